use std::borrow::Cow;

fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@'))
}

/// Prefixes cells that spreadsheet applications would evaluate as formulas.
pub fn guard_formula(value: &str) -> Cow<'_, str> {
    if needs_formula_guard(value) {
        Cow::Owned(format!("'{}", value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Serializes a header and rows into a CSV document. Text cells are
/// formula-guarded; quoting is left to the `csv` writer.
pub fn write_csv<I>(header: &[&str], rows: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.iter().map(|cell| guard_formula(cell).into_owned()))?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
