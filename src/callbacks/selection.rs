/// Maximum number of companies compared on the budget chart.
pub const MAX_COMPARED: usize = 2;

/// Keep only the two most recently picked companies.
///
/// `selected` is in interaction order, so the tail holds the newest picks.
pub fn clamp_selection(selected: &[String]) -> Vec<String> {
    let skip = selected.len().saturating_sub(MAX_COMPARED);
    selected[skip..].to_vec()
}
