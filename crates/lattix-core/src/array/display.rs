//! Bracketed text rendering for [`ShapedArray`].
//!
//! One-dimensional data (and `1 x n` matrices) print on a single line:
//!
//! ```text
//! ( 1  2  3 )
//! ```
//!
//! Anything larger prints one line per row of the last dimension. Every
//! dimension except the last opens a nesting level, drawn as a brace on
//! each side; levels are nested outermost-first on the left. Consecutive
//! blocks of the innermost level are separated by a blank content line.
//!
//! ```text
//! ⎛ ⎛ 1  2 ⎞ ⎞
//! ⎜ ⎝ 3  4 ⎠ ⎟
//! ⎜          ⎟
//! ⎜ ⎛ 5  6 ⎞ ⎟
//! ⎝ ⎝ 7  8 ⎠ ⎠
//! ```

use core::fmt;

use crate::Scalar;

use super::ShapedArray;

impl<T: Scalar> fmt::Display for ShapedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.storage().with_slice(|data| render(self.dims(), data));
        f.write_str(&text)
    }
}

/// Render a row-major buffer of shape `dims`.
fn render<T: Scalar>(dims: &[usize], data: &[T]) -> String {
    if data.is_empty() {
        return "( )".to_string();
    }

    let cells: Vec<String> = data.iter().map(ToString::to_string).collect();
    if dims.len() <= 1 || (dims.len() == 2 && dims[0] == 1) {
        return format!("( {} )", cells.join("  "));
    }

    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let rows: Vec<String> = cells
        .chunks(dims[dims.len() - 1])
        .map(|row| {
            row.iter()
                .map(|c| format!("{c:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect();
    let blank = " ".repeat(rows[0].chars().count());

    let spans = block_spans(dims);
    let innermost = spans[0];
    let total = spans[spans.len() - 1];

    let mut lines = Vec::with_capacity(total);
    let mut rows = rows.iter();
    for n in 0..total {
        let mut line = String::new();
        for &span in spans.iter().rev() {
            line.push_str(left_glyph(n % (span + 1), span));
        }
        if n % (innermost + 1) == innermost {
            line.push_str(&blank);
        } else if let Some(row) = rows.next() {
            line.push_str(row);
        }
        for &span in &spans {
            line.push_str(right_glyph(n % (span + 1), span));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Line count of one block at each nesting level, innermost first.
///
/// The innermost block spans one line per row. Each outer block holds
/// `d` inner blocks with a separator line between neighbours. Requires
/// every dimension to be non-zero.
fn block_spans(dims: &[usize]) -> Vec<usize> {
    let mut spans: Vec<usize> = Vec::with_capacity(dims.len() - 1);
    for &d in dims[..dims.len() - 1].iter().rev() {
        let span = match spans.last() {
            None => d,
            Some(&inner) => d * (inner + 1) - 1,
        };
        spans.push(span);
    }
    spans
}

fn left_glyph(pos: usize, span: usize) -> &'static str {
    if pos == span {
        "  "
    } else if pos == 0 {
        if span == 1 { "( " } else { "⎛ " }
    } else if pos == span - 1 {
        "⎝ "
    } else {
        "⎜ "
    }
}

fn right_glyph(pos: usize, span: usize) -> &'static str {
    if pos == span {
        "  "
    } else if pos == 0 {
        if span == 1 { " )" } else { " ⎞" }
    } else if pos == span - 1 {
        " ⎠"
    } else {
        " ⎟"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaped(dims: &[usize]) -> ShapedArray<i32> {
        let n: usize = dims.iter().product();
        let data = (1..=n).map(|v| v as i32).collect();
        ShapedArray::from_vec(dims, data).unwrap()
    }

    #[test]
    fn test_display_1d() {
        let t = ShapedArray::from_vec([3], vec![1, 2, 3]).unwrap();
        assert_eq!(t.to_string(), "( 1  2  3 )");
    }

    #[test]
    fn test_display_single_row_matrix() {
        let t = ShapedArray::from_vec([1, 3], vec![7, 8, 9]).unwrap();
        assert_eq!(t.to_string(), "( 7  8  9 )");
    }

    #[test]
    fn test_display_flat_row_is_unpadded() {
        let t = ShapedArray::from_vec([3], vec![1, 200, 3]).unwrap();
        assert_eq!(t.to_string(), "( 1  200  3 )");
    }

    #[test]
    fn test_display_2x2() {
        assert_eq!(shaped(&[2, 2]).to_string(), "⎛ 1  2 ⎞\n⎝ 3  4 ⎠");
    }

    #[test]
    fn test_display_pads_to_widest_element() {
        let t = ShapedArray::from_vec([3, 2], vec![1, 20, 3, 4, 500, 6]).unwrap();
        assert_eq!(
            t.to_string(),
            "⎛   1   20 ⎞\n\
             ⎜   3    4 ⎟\n\
             ⎝ 500    6 ⎠"
        );
    }

    #[test]
    fn test_display_2x2x2() {
        assert_eq!(
            shaped(&[2, 2, 2]).to_string(),
            "⎛ ⎛ 1  2 ⎞ ⎞\n\
             ⎜ ⎝ 3  4 ⎠ ⎟\n\
             ⎜          ⎟\n\
             ⎜ ⎛ 5  6 ⎞ ⎟\n\
             ⎝ ⎝ 7  8 ⎠ ⎠"
        );
    }

    #[test]
    fn test_display_single_row_blocks() {
        assert_eq!(
            shaped(&[2, 1, 3]).to_string(),
            "⎛ ( 1  2  3 ) ⎞\n\
             ⎜             ⎟\n\
             ⎝ ( 4  5  6 ) ⎠"
        );
    }

    #[test]
    fn test_display_4d_separators() {
        let text = ShapedArray::from_vec([2, 2, 2, 2], (0..16).collect())
            .unwrap()
            .to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "⎛ ⎛ ⎛  0   1 ⎞ ⎞ ⎞");
        assert_eq!(lines[2], "⎜ ⎜            ⎟ ⎟");
        assert_eq!(lines[5], "⎜                ⎟");
        assert_eq!(lines[10], "⎝ ⎝ ⎝ 14  15 ⎠ ⎠ ⎠");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_display_floats() {
        let t = ShapedArray::from_vec([2, 2], vec![1.5_f64, -2.0, 0.25, 4.0]).unwrap();
        assert_eq!(t.to_string(), "⎛  1.5    -2 ⎞\n⎝ 0.25     4 ⎠");
    }

    #[test]
    fn test_display_empty_and_scalar() {
        assert_eq!(ShapedArray::<i32>::zeros([2, 0]).to_string(), "( )");
        assert_eq!(ShapedArray::full(Vec::<usize>::new(), 5_u8).to_string(), "( 5 )");
    }

    #[test]
    fn test_block_spans() {
        assert_eq!(block_spans(&[2, 3]), vec![2]);
        assert_eq!(block_spans(&[2, 2, 2]), vec![2, 5]);
        assert_eq!(block_spans(&[3, 2, 4, 5]), vec![4, 9, 29]);
    }
}
