//! The dashboard colour cycle.

/// Categorical palette shared by every chart; series beyond the thirteenth
/// wrap around.
pub const PALETTE: [&str; 13] = [
  "#0081a7", "#00afb9", "#f07167", "#e9c46a", "#264653", "#f4a261",
  "#e76f51", "#ef233c", "#fed9b7", "#f6bd60", "#84a59d", "#f95738",
  "#fdfcdc",
];

/// Colour for the `i`-th series.
pub fn color(i: usize) -> &'static str {
  PALETTE[i % PALETTE.len()]
}
