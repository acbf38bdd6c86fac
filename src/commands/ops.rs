use crate::catalog::{CATALOG, Operation};

/// Numbered catalog in resolution order.
pub(super) fn listing() -> String {
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, op)| format!("  {}. {}\n", i + 1, describe(op)))
        .collect()
}

/// Matching phrase, then inputs and outputs.
fn describe(op: &Operation) -> String {
    let inputs: Vec<&str> = op.inputs.iter().map(|i| i.path).collect();
    format!(
        "{:<18} {} -> {}",
        format!("\"{}\"", op.phrase),
        inputs.join(", "),
        op.outputs.join(", ")
    )
}
