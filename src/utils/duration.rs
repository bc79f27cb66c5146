/// Format a second count as "M:SS" for display collaborators.
///
/// Durations of an hour or more roll the hours into the minute field
/// ("75:30"), matching how the timer pill renders long stopwatch runs.
pub fn format_seconds(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}
