use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Stable-sort a JSON array of contacts by `(last_name, first_name)`.
///
/// Each contact is kept verbatim, including fields other than the two sort
/// keys. Output is pretty-printed with 2-space indentation.
pub fn sort_contacts(content: &str) -> Result<String> {
    let doc: Value = serde_json::from_str(content).context("contacts are not valid JSON")?;
    let Value::Array(contacts) = doc else {
        bail!("contacts must be a JSON array");
    };

    let mut keyed = contacts
        .into_iter()
        .enumerate()
        .map(|(i, contact)| {
            let last = name_field(&contact, "last_name", i)?;
            let first = name_field(&contact, "first_name", i)?;
            Ok(((last, first), contact))
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by is stable: equal keys keep input order.
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    let sorted: Vec<Value> = keyed.into_iter().map(|(_, contact)| contact).collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}

fn name_field(contact: &Value, field: &str, index: usize) -> Result<String> {
    contact
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("contact {} has no string field {:?}", index, field))
}
