//! Batch compositing of many strings in parallel
//!
//! A [`Font`] is read-only once parsed, so every line can be composited on
//! its own rayon worker against the same font.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bdfont_core::{error::Result, Bitmap, CompositeOptions, Font, Renderer};
use rayon::prelude::*;

/// Result from batch rendering.
#[derive(Debug)]
pub struct BatchResult {
    /// Index of the line in the batch
    pub index: usize,
    /// Rendering result or error
    pub result: Result<Bitmap>,
    /// How long the rendering took
    pub elapsed: Duration,
}

/// Batch renderer for parallel text rendering.
pub struct BatchRenderer {
    renderer: Arc<dyn Renderer>,
}

impl BatchRenderer {
    /// Create a new batch renderer with the given renderer.
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }

    /// Render every line in parallel; results come back in input order.
    pub fn render_batch<S>(
        &self,
        font: &Font,
        lines: &[S],
        options: &CompositeOptions,
    ) -> Vec<BatchResult>
    where
        S: AsRef<str> + Sync,
    {
        log::debug!(
            "batch: {} lines with the {} renderer",
            lines.len(),
            self.renderer.name()
        );

        lines
            .par_iter()
            .enumerate()
            .map(|(index, line)| {
                let start = Instant::now();
                let result = self.renderer.render(font, line.as_ref(), options);
                BatchResult {
                    index,
                    result,
                    elapsed: start.elapsed(),
                }
            })
            .collect()
    }
}

/// Composite each line on its own canvas, in parallel, keeping input order
pub fn composite_lines<S>(font: &Font, lines: &[S], options: &CompositeOptions) -> Vec<Result<Bitmap>>
where
    S: AsRef<str> + Sync,
{
    lines
        .par_iter()
        .map(|line| crate::composite(font, line.as_ref(), options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextCompositor;
    use bdfont_core::GeometryPolicy;

    const FONT: &str = "\
STARTFONT 2.1
FONTBOUNDINGBOX 2 2 0 0
STARTCHAR bar
ENCODING 124
DWIDTH 2 0
BBX 1 2 0 0
BITMAP
80
80
ENDCHAR
ENDFONT
";

    fn options() -> CompositeOptions {
        CompositeOptions {
            repeat_count: 0,
            kerning_bias: 0,
            geometry: GeometryPolicy::Strict,
        }
    }

    #[test]
    fn test_lines_keep_order() {
        let font = bdfont_parse::parse(FONT).unwrap();
        let lines: Vec<String> = (0..64).map(|n| "|".repeat(n)).collect();

        let results = composite_lines(&font, &lines, &options());

        assert_eq!(results.len(), 64);
        for (n, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap().width(), 2 * n);
        }
    }

    #[test]
    fn test_batch_renderer_reports_indices() {
        let font = bdfont_parse::parse(FONT).unwrap();
        let batch = BatchRenderer::new(Arc::new(TextCompositor::new()));

        let results = batch.render_batch(&font, &["|", "||", ""], &options());

        let indices: Vec<_> = results.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let widths: Vec<_> = results
            .into_iter()
            .map(|r| r.result.unwrap().width())
            .collect();
        assert_eq!(widths, vec![2, 4, 0]);
    }
}
