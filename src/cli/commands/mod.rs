//! Subcommands of the `ghostbuster` binary.

pub mod replay;
pub mod simulate;

use crate::types::Position;

/// Parse a `ROW,COL` pair.
pub(crate) fn parse_position(value: &str) -> Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))
    };
    Ok((parse(row)?, parse(col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_row_col_pairs() {
        assert_eq!(parse_position("3,4"), Ok((3, 4)));
        assert_eq!(parse_position(" 0 , 9 "), Ok((0, 9)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
    }
}
