use crate::consts::GOLD_TICKET_TYPE;

/// Total revenue for one ticket type.
pub const REVENUE_QUERY: &str = "SELECT SUM(units * price) FROM tickets WHERE type = ?1";

/// Bound parameters for the gold revenue query.
pub fn gold_params() -> Vec<String> {
    vec![GOLD_TICKET_TYPE.to_string()]
}
