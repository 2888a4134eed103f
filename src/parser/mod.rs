pub mod lines;
pub mod records;

use crate::config::Windows;
use crate::profile::Profile;

/// Three passes over the page lines: tiers, ranks, medals. Each pass only
/// touches the categories it matches; anything not found keeps its default.
pub fn extract_profile(username: &str, lines: &[String], windows: &Windows) -> Profile {
    let mut profile = Profile::new(username);
    records::assign_tiers(lines, windows, &mut profile);
    records::assign_ranks(lines, windows, &mut profile);
    records::assign_medals(lines, windows, &mut profile);
    profile
}

/// Normalize raw page text and extract in one go.
pub fn process_text(username: &str, text: &str) -> Profile {
    let lines = lines::split_lines(text);
    extract_profile(username, &lines, &Windows::default())
}
