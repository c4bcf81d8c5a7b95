//! Basket file loading and validation.
//!
//! Supported formats, chosen by file extension:
//! - `.toml` — a table of `SYMBOL = weight`
//! - `.json` — an object of `"SYMBOL": weight`
//! - `.csv` — `symbol,weight` rows, optional header line
//!
//! The loaded weights then pass through the core validation: sum to
//! 100 ± 0.1, or rescaled to exactly 100 when `--scale` is given.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use slicelab_core::domain::Allocation;

/// Load a basket file and validate (or auto-scale) it into an [`Allocation`].
pub fn load_basket(path: &Path, scale: bool) -> Result<Allocation> {
    let weights = read_weights(path)?;
    let alloc = if scale {
        Allocation::auto_scaled(weights)
    } else {
        Allocation::validated(weights)
    };
    alloc.with_context(|| format!("invalid basket in {}", path.display()))
}

fn read_weights(path: &Path) -> Result<Vec<(String, f64)>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "toml" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let table: BTreeMap<String, f64> =
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
            Ok(table.into_iter().collect())
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let Entries(weights) = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            ensure_unique(&weights, path)?;
            Ok(weights)
        }
        "csv" => read_csv_weights(path),
        other => bail!(
            "unsupported basket format '.{other}' (expected .toml, .json, or .csv): {}",
            path.display()
        ),
    }
}

/// A basket object read as raw entries, so a duplicated symbol survives
/// parsing and can be rejected instead of silently keeping the last value.
struct Entries(Vec<(String, f64)>);

impl<'de> serde::Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> serde::de::Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object of symbol: weight")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Entries, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, f64>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn ensure_unique(weights: &[(String, f64)], path: &Path) -> Result<()> {
    let mut seen = std::collections::BTreeSet::new();
    for (symbol, _) in weights {
        if !seen.insert(symbol.as_str()) {
            bail!("{}: duplicate symbol {symbol}", path.display());
        }
    }
    Ok(())
}

fn read_csv_weights(path: &Path) -> Result<Vec<(String, f64)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let mut weights = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("parsing {}", path.display()))?;
        if record.len() < 2 {
            bail!("{}: line {} has fewer than 2 fields", path.display(), line + 1);
        }
        let symbol = record[0].to_string();
        match record[1].parse::<f64>() {
            Ok(weight) => weights.push((symbol, weight)),
            // Tolerate a single header line; anything non-numeric later is
            // malformed data.
            Err(_) if line == 0 => continue,
            Err(_) => bail!(
                "{}: line {}: '{}' is not a number",
                path.display(),
                line + 1,
                &record[1]
            ),
        }
    }

    ensure_unique(&weights, path)?;
    Ok(weights)
}
