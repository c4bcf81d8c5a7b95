//! Console report rendering.
//!
//! Output format: a slop header, one
//! `Slice N: $C.CC` / `Drop: ...` pair per step, a per-symbol cumulative
//! spend table, and an 80-dash rule between plans.

use slicelab_core::domain::Allocation;
use slicelab_core::engine::ToleranceSearch;
use slicelab_core::pricing::{price_plan, PricedPlan};

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Render one priced plan as a text report.
pub fn render_priced_plan(priced: &PricedPlan) -> String {
    let mut out = String::new();

    let slop_pct = if priced.investment > 0.0 {
        priced.slop / priced.investment * 100.0
    } else {
        0.0
    };
    out.push_str(&format!("${:.2} ({:.2}%) slop\n\n", priced.slop, slop_pct));

    for step in &priced.steps {
        if step.enforced_minimum {
            out.push_str(&format!(
                "Slice {}: ${:.2} (minimum order enforced, exact ${:.2})\n",
                step.index, step.symbol_cost, step.raw_cost
            ));
        } else {
            out.push_str(&format!("Slice {}: ${:.2}\n", step.index, step.symbol_cost));
        }
        out.push_str(&format!("Drop: {}\n", step.dropped.join(", ")));
    }

    for (symbol, spend) in &priced.spend_per_symbol {
        out.push_str(&format!("{symbol}\t${spend:.2}\n"));
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Render a full tolerance search: every reported plan in walk order, then
/// the accepted plan summary.
pub fn render_search(search: &ToleranceSearch, investment: f64, min_order: f64) -> String {
    let mut out = String::new();

    for report in &search.reports {
        out.push_str(&format!("epsilon {:.4}\n", report.epsilon));
        out.push_str(&render_priced_plan(&price_plan(
            &report.plan,
            investment,
            min_order,
        )));
    }

    out.push_str(&format!(
        "Accepted: {} step(s) at epsilon {:.4}, ${:.2} slop\n",
        search.best.step_count(),
        search.best.epsilon,
        search.best_slop
    ));
    out
}

/// Render the interpolation migration path, one stage per fixed point.
pub fn render_walk(sequence: &[Allocation], target: &Allocation) -> String {
    let order = target.priority_order();
    let mut out = String::new();

    for (stage, alloc) in sequence.iter().enumerate() {
        if stage == 0 {
            out.push_str(&format!("Stage 0 (even split, {} symbols):\n", alloc.len()));
        } else {
            out.push_str(&format!("Stage {stage} (fix {}):\n", order[stage - 1]));
        }
        for symbol in &order {
            let weight = alloc.get(symbol).unwrap_or(0.0);
            let pinned = stage > 0 && order[..stage].iter().any(|s| s == symbol);
            let marker = if pinned { " *" } else { "" };
            out.push_str(&format!("  {symbol}\t{weight:.2}%{marker}\n"));
        }
    }
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Render a validated basket with its priority order.
pub fn render_basket(alloc: &Allocation) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} symbols, total weight {:.2}%\n",
        alloc.len(),
        alloc.total_weight()
    ));
    for symbol in alloc.priority_order() {
        let weight = alloc.get(&symbol).unwrap_or(0.0);
        out.push_str(&format!("  {symbol}\t{weight:.2}%\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicelab_core::engine::{decompose, interpolate, search_tolerance};
    use slicelab_core::pricing::MIN_ORDER_DOLLARS;

    fn basket() -> Allocation {
        Allocation::validated([("A", 50.0), ("B", 30.0), ("C", 20.0)]).unwrap()
    }

    #[test]
    fn plan_report_has_slop_header_and_slices() {
        let priced = price_plan(&decompose(&basket(), 0.0), 1000.0, MIN_ORDER_DOLLARS);
        let report = render_priced_plan(&priced);

        assert!(report.starts_with("$0.00 (0.00%) slop\n"));
        assert!(report.contains("Slice 1: $200.00\nDrop: C\n"));
        assert!(report.contains("Slice 2: $100.00\nDrop: B\n"));
        assert!(report.contains("A\t$500.00\n"));
        assert!(report.contains(RULE));
    }

    #[test]
    fn plan_report_annotates_enforced_minimums() {
        let a = Allocation::validated([("A", 94.0), ("B", 3.0), ("C", 3.0)]).unwrap();
        let priced = price_plan(&decompose(&a, 0.0), 100.0, MIN_ORDER_DOLLARS);
        let report = render_priced_plan(&priced);

        assert!(report.contains("Slice 1: $5.00 (minimum order enforced, exact $3.00)"));
    }

    #[test]
    fn search_report_ends_with_accepted_summary() {
        let search = search_tolerance(&basket(), 1000.0, 0.0);
        let report = render_search(&search, 1000.0, MIN_ORDER_DOLLARS);

        assert!(report.contains("epsilon 0.0000\n"));
        assert!(report.contains("Accepted: 3 step(s) at epsilon 0.0000, $0.00 slop\n"));
    }

    #[test]
    fn walk_report_marks_pinned_symbols() {
        let target = basket();
        let report = render_walk(&interpolate(&target), &target);

        assert!(report.contains("Stage 0 (even split, 3 symbols):"));
        assert!(report.contains("Stage 1 (fix A):"));
        assert!(report.contains("A\t50.00% *"));
    }

    #[test]
    fn basket_report_lists_priority_order() {
        let report = render_basket(&basket());
        let a = report.find("A\t").unwrap();
        let b = report.find("B\t").unwrap();
        let c = report.find("C\t").unwrap();
        assert!(a < b && b < c);
    }
}
