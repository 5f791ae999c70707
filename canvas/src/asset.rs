//! Sprite resolution: ordered candidate URLs per logical asset.
//!
//! Each logical sprite (background, lobster, bubble, feed) has a list of file
//! variants. Loading tries them in order and keeps the first that decodes;
//! exhausting the list yields `None`, and every draw path has a flat-colour
//! fallback for that case. Loading is asynchronous and the renderer tolerates
//! a slot that has not resolved yet.

#[cfg(test)]
#[path = "asset_test.rs"]
mod asset_test;

use std::future::Future;

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// The scene's logical sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Background,
    Lobster,
    Bubble,
    Feed,
}

impl AssetKind {
    pub const ALL: [Self; 4] = [Self::Background, Self::Lobster, Self::Bubble, Self::Feed];

    /// Candidate URLs, most preferred first.
    #[must_use]
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Background => &[
                "assets/web/aquarium_bg.webp",
                "assets/web/aquarium_bg.png",
                "assets/web/aquarium_bg.jpg",
                "assets/web/aquarium_bg.jpeg",
            ],
            Self::Lobster => &["assets/web/lobster_pixel.png", "assets/web/lobster_pixel.webp"],
            Self::Bubble => &["assets/web/bubble_pixel.png", "assets/web/bubble_pixel.webp"],
            Self::Feed => &["assets/web/feed_pixel.png", "assets/web/feed_pixel.webp"],
        }
    }
}

/// Why a single candidate failed to load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("could not create image element")]
    Create,
    #[error("image failed to load: {url}")]
    Load { url: String },
}

/// Something that can turn a URL into a decoded image.
pub trait ImageLoader {
    type Image;

    /// Load one URL.
    fn load(&self, url: &str) -> impl Future<Output = Result<Self::Image, AssetError>>;
}

/// Try each candidate in order; the first success wins.
pub async fn load_first_available<L: ImageLoader>(loader: &L, candidates: &[&str]) -> Option<L::Image> {
    for url in candidates {
        if let Ok(image) = loader.load(url).await {
            return Some(image);
        }
    }
    None
}

/// Resolution state of one logical sprite.
#[derive(Debug, Clone, Default)]
pub enum AssetSlot<I> {
    /// Still loading.
    #[default]
    Pending,
    /// Loaded from one of the candidates.
    Ready(I),
    /// Every candidate failed.
    Missing,
}

impl<I> AssetSlot<I> {
    /// Slot for a finished load.
    #[must_use]
    pub fn resolved(image: Option<I>) -> Self {
        match image {
            Some(image) => Self::Ready(image),
            None => Self::Missing,
        }
    }

    /// The image, if one is ready to draw.
    #[must_use]
    pub fn image(&self) -> Option<&I> {
        match self {
            Self::Ready(image) => Some(image),
            Self::Pending | Self::Missing => None,
        }
    }
}

/// The four sprite slots the renderer draws from.
#[derive(Debug, Clone)]
pub struct SceneAssets<I> {
    pub background: AssetSlot<I>,
    pub lobster: AssetSlot<I>,
    pub bubble: AssetSlot<I>,
    pub feed: AssetSlot<I>,
}

impl<I> Default for SceneAssets<I> {
    fn default() -> Self {
        Self {
            background: AssetSlot::Pending,
            lobster: AssetSlot::Pending,
            bubble: AssetSlot::Pending,
            feed: AssetSlot::Pending,
        }
    }
}

impl<I> SceneAssets<I> {
    pub fn set(&mut self, kind: AssetKind, slot: AssetSlot<I>) {
        match kind {
            AssetKind::Background => self.background = slot,
            AssetKind::Lobster => self.lobster = slot,
            AssetKind::Bubble => self.bubble = slot,
            AssetKind::Feed => self.feed = slot,
        }
    }
}

/// Resolve one logical sprite with `loader`.
pub async fn resolve<L: ImageLoader>(loader: &L, kind: AssetKind) -> AssetSlot<L::Image> {
    AssetSlot::resolved(load_first_available(loader, kind.candidates()).await)
}

/// Browser image loader backed by `HtmlImageElement`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlImageLoader;

impl ImageLoader for HtmlImageLoader {
    type Image = HtmlImageElement;

    async fn load(&self, url: &str) -> Result<HtmlImageElement, AssetError> {
        let image = HtmlImageElement::new().map_err(|_| AssetError::Create)?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(url);
        let loaded = JsFuture::from(promise).await;
        image.set_onload(None);
        image.set_onerror(None);
        match loaded {
            Ok(_) => Ok(image),
            Err(_) => Err(AssetError::Load { url: url.to_owned() }),
        }
    }
}
