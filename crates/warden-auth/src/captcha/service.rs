//! Captcha issuance and verification backed by the shared cache.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;
use uuid::Uuid;

use warden_cache::CacheManager;
use warden_cache::keys;
use warden_core::config::PassportConfig;
use warden_core::result::AppResult;
use warden_core::traits::CacheProvider;

/// Characters used in captcha codes. Look-alikes (0/O, 1/I/L) are left out.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

const GLYPH_WIDTH: u32 = 28;
const IMAGE_HEIGHT: u32 = 44;
const NOISE_LINES: usize = 5;

/// A newly issued captcha.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    /// Opaque id the client echoes back with its answer.
    pub correlation_id: String,
    /// Rendered image as a `data:` URI.
    pub image: String,
}

/// Issues captcha challenges and checks answers.
#[async_trait]
pub trait CaptchaService: Send + Sync + std::fmt::Debug {
    /// Issues a new challenge.
    async fn generate(&self) -> AppResult<CaptchaChallenge>;

    /// Checks `code` against the challenge `correlation_id`.
    ///
    /// A challenge can be answered at most once; the stored code is
    /// consumed whether or not the answer matches.
    async fn verify(&self, correlation_id: &str, code: &str) -> AppResult<bool>;
}

/// Captcha service storing codes in the cache under their correlation id.
#[derive(Debug, Clone)]
pub struct CacheCaptchaService {
    cache: Arc<CacheManager>,
    length: usize,
    ttl: Duration,
}

impl CacheCaptchaService {
    /// Creates a service with an explicit code length and lifetime.
    pub fn new(cache: Arc<CacheManager>, length: usize, ttl: Duration) -> Self {
        Self {
            cache,
            length: length.max(1),
            ttl,
        }
    }

    /// Creates a service from passport configuration.
    pub fn from_config(cache: Arc<CacheManager>, config: &PassportConfig) -> Self {
        Self::new(
            cache,
            config.captcha_length,
            Duration::from_secs(config.captcha_ttl_seconds),
        )
    }

    fn random_code(&self) -> String {
        (0..self.length)
            .map(|_| char::from(ALPHABET[random_below(ALPHABET.len() as u32) as usize]))
            .collect()
    }
}

#[async_trait]
impl CaptchaService for CacheCaptchaService {
    async fn generate(&self) -> AppResult<CaptchaChallenge> {
        let code = self.random_code();
        let correlation_id = Uuid::new_v4().to_string();

        self.cache
            .set(
                &keys::captcha(&correlation_id),
                &code.to_ascii_lowercase(),
                self.ttl,
            )
            .await?;

        debug!(correlation_id = %correlation_id, "Captcha issued");

        Ok(CaptchaChallenge {
            correlation_id,
            image: render_data_uri(&code),
        })
    }

    async fn verify(&self, correlation_id: &str, code: &str) -> AppResult<bool> {
        if correlation_id.is_empty() || code.is_empty() {
            return Ok(false);
        }

        let Some(expected) = self.cache.take(&keys::captcha(correlation_id)).await? else {
            return Ok(false);
        };

        Ok(expected.eq_ignore_ascii_case(code))
    }
}

fn random_below(bound: u32) -> u32 {
    rand::random_range(0..bound)
}

/// Renders `code` as an SVG with jittered glyphs and noise lines.
fn render_svg(code: &str) -> String {
    let width = GLYPH_WIDTH * code.chars().count() as u32 + 20;
    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{IMAGE_HEIGHT}" viewBox="0 0 {width} {IMAGE_HEIGHT}"><rect width="100%" height="100%" fill="#f4f4f4"/>"##
    );

    for _ in 0..NOISE_LINES {
        let _ = write!(
            svg,
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#{:06x}" stroke-width="1"/>"##,
            random_below(width),
            random_below(IMAGE_HEIGHT),
            random_below(width),
            random_below(IMAGE_HEIGHT),
            random_below(0x00a0_a0a0),
        );
    }

    for (i, ch) in code.chars().enumerate() {
        let x = 10 + GLYPH_WIDTH * i as u32 + random_below(6);
        let y = 28 + random_below(8);
        let angle = random_below(31) as i32 - 15;
        let _ = write!(
            svg,
            r##"<text x="{x}" y="{y}" transform="rotate({angle} {x} {y})" font-family="monospace" font-size="26" font-weight="bold" fill="#{:06x}">{ch}</text>"##,
            random_below(0x0060_6060),
        );
    }

    svg.push_str("</svg>");
    svg
}

fn render_data_uri(code: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(render_svg(code))
    )
}
