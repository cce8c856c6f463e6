//! Synthetic text-line assembly from isolated word samples.
//!
//! Word-level datasets can train a line recognizer if several word images
//! are composited onto a shared canvas per sample. Each synthesized line
//! pastes cyclically selected words onto a white canvas, vertically
//! centered, separated by horizontal gaps, and carries the concatenated
//! transcripts as its ground truth. Layout is either fixed or randomized,
//! driven by an explicitly seeded generator so synthesis is reproducible.

use crate::core::batch::ImageBatch;
use crate::core::config::PreprocessorConfig;
use crate::core::errors::PreprocessResult;
use crate::processors::normalization::fallback_canvas;
use image::{GrayImage, Luma, imageops};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Number of words per line when layout randomization is off.
const DEFAULT_WORD_COUNT: usize = 5;

/// Separator width in pixels when layout randomization is off.
const DEFAULT_WORD_SEP: u32 = 30;

/// Layout selection for synthesized lines, resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutPolicy {
    /// Fixed word count and separator width.
    Fixed,
    /// Word count drawn uniformly from [1, 8], separator width from
    /// [20, 50] pixels per gap.
    Randomized,
}

impl LayoutPolicy {
    fn word_count(self, rng: &mut StdRng) -> usize {
        match self {
            LayoutPolicy::Fixed => DEFAULT_WORD_COUNT,
            LayoutPolicy::Randomized => rng.gen_range(1..=8),
        }
    }

    fn word_sep(self, rng: &mut StdRng) -> u32 {
        match self {
            LayoutPolicy::Fixed => DEFAULT_WORD_SEP,
            LayoutPolicy::Randomized => rng.gen_range(20..=50),
        }
    }
}

/// Composites word samples into synthetic multi-word line images.
///
/// Owns its random source: seeding it through
/// [`PreprocessorConfig::rng_seed`] makes every layout decision
/// reproducible. A selected sample whose image is missing contributes the
/// blank fallback canvas instead.
#[derive(Debug)]
pub struct LineSynthesizer {
    policy: LayoutPolicy,
    fallback: GrayImage,
    rng: StdRng,
}

impl LineSynthesizer {
    /// Creates a synthesizer from the pipeline configuration.
    pub fn new(config: &PreprocessorConfig) -> Self {
        let policy = if config.data_augmentation {
            LayoutPolicy::Randomized
        } else {
            LayoutPolicy::Fixed
        };
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            policy,
            fallback: fallback_canvas(config.target_size),
            rng,
        }
    }

    /// Synthesizes one line image per batch position.
    ///
    /// For position `i`, words are selected by cyclic indexing
    /// `(i + j) % batch_size`; batches smaller than the word count reuse
    /// samples. The line's transcript is the selected ground-truth texts
    /// joined with single spaces, in selection order. Word pixels are
    /// copied onto the canvas; the input batch is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output batch cannot be assembled; the
    /// per-sample composition itself is infallible.
    pub fn synthesize(&mut self, batch: &ImageBatch) -> PreprocessResult<ImageBatch> {
        let batch_size = batch.batch_size();
        let mut images = Vec::with_capacity(batch_size);
        let mut texts = Vec::with_capacity(batch_size);

        for i in 0..batch_size {
            let word_count = self.policy.word_count(&mut self.rng);

            let transcript = (0..word_count)
                .map(|j| batch.texts()[(i + j) % batch_size].as_str())
                .collect::<Vec<_>>()
                .join(" ");

            // Select word images and compute the canvas extent. The first
            // entry of `separators` is zero so the cursor advance below is
            // uniform across words.
            let mut selected = Vec::with_capacity(word_count);
            let mut separators = vec![0u32];
            let mut height = 0u32;
            let mut width = 0u32;
            for j in 0..word_count {
                let word = batch.images()[(i + j) % batch_size]
                    .as_ref()
                    .unwrap_or(&self.fallback);
                height = height.max(word.height());
                width += word.width();
                selected.push(word);
                if j + 1 < word_count {
                    let sep = self.policy.word_sep(&mut self.rng);
                    width += sep;
                    separators.push(sep);
                }
            }

            let mut canvas = GrayImage::from_pixel(width, height, Luma([u8::MAX]));
            let mut x = 0u32;
            for (word, &sep) in selected.iter().zip(&separators) {
                x += sep;
                let y = (height - word.height()) / 2;
                imageops::replace(&mut canvas, *word, i64::from(x), i64::from(y));
                x += word.width();
            }

            images.push(Some(canvas));
            texts.push(transcript);
        }

        debug!("synthesized {} line images", batch_size);
        ImageBatch::new(images, texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    fn single_word_batch(img: GrayImage, text: &str) -> ImageBatch {
        ImageBatch::new(vec![Some(img)], vec![text.to_string()]).unwrap()
    }

    fn fixed_config() -> PreprocessorConfig {
        PreprocessorConfig::default().with_line_mode(true)
    }

    #[test]
    fn fixed_layout_repeats_single_sample() {
        let mut synth = LineSynthesizer::new(&fixed_config());
        let batch = single_word_batch(word(10, 6, 40), "he");

        let lines = synth.synthesize(&batch).unwrap();
        assert_eq!(lines.batch_size(), 1);
        assert_eq!(lines.texts()[0], "he he he he he");

        let canvas = lines.images()[0].as_ref().unwrap();
        // 5 words of width 10 and 4 separators of width 30
        assert_eq!(canvas.dimensions(), (5 * 10 + 4 * 30, 6));

        // word pixels are copied, separator columns stay white
        assert_eq!(canvas.get_pixel(0, 0)[0], 40);
        assert_eq!(canvas.get_pixel(9, 5)[0], 40);
        assert_eq!(canvas.get_pixel(10, 0)[0], 255);
        assert_eq!(canvas.get_pixel(39, 5)[0], 255);
        assert_eq!(canvas.get_pixel(40, 0)[0], 40);
    }

    #[test]
    fn selection_is_cyclic() {
        let mut synth = LineSynthesizer::new(&fixed_config());
        let batch = ImageBatch::new(
            vec![Some(word(4, 4, 10)), Some(word(4, 4, 20))],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();

        let lines = synth.synthesize(&batch).unwrap();
        assert_eq!(lines.texts()[0], "a b a b a");
        assert_eq!(lines.texts()[1], "b a b a b");

        // first pasted word of line 1 is sample 1
        let canvas = lines.images()[1].as_ref().unwrap();
        assert_eq!(canvas.get_pixel(0, 0)[0], 20);
    }

    #[test]
    fn words_are_vertically_centered() {
        let mut synth = LineSynthesizer::new(&fixed_config());
        let batch = ImageBatch::new(
            vec![Some(word(4, 6, 10)), Some(word(4, 2, 20))],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();

        let lines = synth.synthesize(&batch).unwrap();
        let canvas = lines.images()[0].as_ref().unwrap();
        assert_eq!(canvas.height(), 6);

        // the short word sits at rows 2..4 of its slot (x = 4 + 30)
        assert_eq!(canvas.get_pixel(34, 1)[0], 255);
        assert_eq!(canvas.get_pixel(34, 2)[0], 20);
        assert_eq!(canvas.get_pixel(34, 3)[0], 20);
        assert_eq!(canvas.get_pixel(34, 4)[0], 255);
    }

    #[test]
    fn missing_samples_use_fallback_canvas() {
        let config = fixed_config().with_target_size(8, 4);
        let mut synth = LineSynthesizer::new(&config);
        let batch = ImageBatch::new(vec![None], vec!["x".to_string()]).unwrap();

        let lines = synth.synthesize(&batch).unwrap();
        let canvas = lines.images()[0].as_ref().unwrap();
        assert_eq!(canvas.dimensions(), (5 * 8 + 4 * 30, 4));
        // pasted fallback is black, separators remain white
        assert_eq!(canvas.get_pixel(0, 0)[0], 0);
        assert_eq!(canvas.get_pixel(7, 3)[0], 0);
        assert_eq!(canvas.get_pixel(8, 0)[0], 255);
    }

    #[test]
    fn seeded_synthesis_is_reproducible() {
        let config = fixed_config().with_data_augmentation(true).with_rng_seed(99);
        let batch = ImageBatch::new(
            vec![Some(word(10, 4, 30)), Some(word(6, 4, 60))],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();

        let mut first = LineSynthesizer::new(&config);
        let mut second = LineSynthesizer::new(&config);
        let lines_a = first.synthesize(&batch).unwrap();
        let lines_b = second.synthesize(&batch).unwrap();

        assert_eq!(lines_a.texts(), lines_b.texts());
        for (a, b) in lines_a.images().iter().zip(lines_b.images()) {
            assert_eq!(
                a.as_ref().unwrap().as_raw(),
                b.as_ref().unwrap().as_raw()
            );
        }
    }

    #[test]
    fn randomized_layout_stays_in_bounds() {
        let config = fixed_config().with_data_augmentation(true).with_rng_seed(7);
        let mut synth = LineSynthesizer::new(&config);
        let batch = single_word_batch(word(10, 4, 30), "w");

        for _ in 0..32 {
            let lines = synth.synthesize(&batch).unwrap();
            let word_count = lines.texts()[0].split(' ').count();
            assert!((1..=8).contains(&word_count));

            // canvas width = words + separators, each separator in [20, 50]
            let width = lines.images()[0].as_ref().unwrap().width();
            let sep_total = width - 10 * word_count as u32;
            let gaps = word_count as u32 - 1;
            assert!(sep_total >= 20 * gaps);
            assert!(sep_total <= 50 * gaps);
        }
    }
}
