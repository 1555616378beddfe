//! Fixed-width context windows around entity mentions.
//!
//! A window is always exactly `pre + 1 + post` tokens: the mention marker in
//! the middle, the surrounding tokens clamped at document boundaries, and
//! synthetic pad tokens filling whatever was clamped away. Windows are deep
//! copies; mutating one never touches the source stream or a sibling window.

use crate::token::{Token, PAD_TOKEN, TARGET_MARKER};

/// Extractor for padded context windows, one per mention of a label.
#[derive(Debug, Clone)]
pub struct WindowExtractor {
    pre: usize,
    post: usize,
    pad_token: String,
    mask_target: bool,
}

impl Default for WindowExtractor {
    fn default() -> Self {
        Self {
            pre: 15,
            post: 15,
            pad_token: PAD_TOKEN.to_string(),
            mask_target: true,
        }
    }
}

impl WindowExtractor {
    /// Create an extractor with default settings (15 + 1 + 15, masking on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of tokens taken before and after the mention.
    #[must_use]
    pub fn with_sizes(mut self, pre: usize, post: usize) -> Self {
        self.pre = pre;
        self.post = post;
        self
    }

    /// Set the word used for synthetic padding tokens.
    #[must_use]
    pub fn with_pad_token(mut self, pad_token: impl Into<String>) -> Self {
        self.pad_token = pad_token.into();
        self
    }

    /// Set whether mention markers inside the window are replaced with
    /// [`TARGET_MARKER`].
    #[must_use]
    pub fn mask_target(mut self, mask: bool) -> Self {
        self.mask_target = mask;
        self
    }

    /// Total window length produced by this extractor.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.pre + 1 + self.post
    }

    /// Extract one window per occurrence of `label` in `tokens`.
    ///
    /// `tokens` is the rewritten stream with empty words already removed;
    /// an occurrence is any token whose `word` equals the label. With
    /// masking enabled, every window token whose `word` equals the label
    /// (center and co-mentions alike) is rewritten to [`TARGET_MARKER`], so
    /// the window identifies *that* an entity is being scored without
    /// leaking which cluster it is.
    #[must_use]
    pub fn windows(&self, label: &str, tokens: &[Token]) -> Vec<Vec<Token>> {
        let mut windows = Vec::new();
        for (k, token) in tokens.iter().enumerate() {
            if token.word != label {
                continue;
            }
            let start = k.saturating_sub(self.pre);
            let end = (k + 1 + self.post).min(tokens.len());

            let mut window = Vec::with_capacity(self.window_len());
            for _ in 0..self.pre - (k - start) {
                window.push(Token::pad(&self.pad_token));
            }
            window.extend(tokens[start..end].iter().cloned());
            while window.len() < self.window_len() {
                window.push(Token::pad(&self.pad_token));
            }

            if self.mask_target {
                for t in &mut window {
                    if t.word == label {
                        t.word = TARGET_MARKER.to_string();
                    }
                }
            }
            windows.push(window);
        }
        windows
    }
}
