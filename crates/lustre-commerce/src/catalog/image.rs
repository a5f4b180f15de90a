//! Normalized product images.

use serde::{Deserialize, Serialize};

/// Where an image is meant to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// Primary card image.
    Front,
    /// Hover / alternate image.
    Back,
    /// Detail-page gallery image.
    Gallery,
    /// Positional image with no declared role.
    #[default]
    Unspecified,
}

impl ImageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Front => "front",
            ImageRole::Back => "back",
            ImageRole::Gallery => "gallery",
            ImageRole::Unspecified => "unspecified",
        }
    }

    /// Parse a declared role. Unknown roles are unspecified.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "front" | "main" | "primary" => ImageRole::Front,
            "back" | "hover" => ImageRole::Back,
            "gallery" => ImageRole::Gallery,
            _ => ImageRole::Unspecified,
        }
    }
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL or asset path.
    pub url: String,
    /// Declared role.
    pub role: ImageRole,
}

impl Image {
    pub fn new(url: impl Into<String>, role: ImageRole) -> Self {
        Self {
            url: url.into(),
            role,
        }
    }
}

/// Ordered product images with role-aware lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProductImages(Vec<Image>);

impl ProductImages {
    pub fn new(images: Vec<Image>) -> Self {
        Self(images)
    }

    /// The card image: the first `front` image, else the first image.
    pub fn front(&self) -> Option<&Image> {
        self.first_with(ImageRole::Front).or_else(|| self.0.first())
    }

    /// The hover image: the first `back` image, else the second image.
    pub fn back(&self) -> Option<&Image> {
        self.first_with(ImageRole::Back).or_else(|| self.0.get(1))
    }

    /// All images in order.
    pub fn gallery(&self) -> &[Image] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn first_with(&self, role: ImageRole) -> Option<&Image> {
        self.0.iter().find(|i| i.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_lookup() {
        let images = ProductImages::new(vec![
            Image::new("gallery.jpg", ImageRole::Gallery),
            Image::new("back.jpg", ImageRole::Back),
            Image::new("front.jpg", ImageRole::Front),
        ]);
        assert_eq!(images.front().unwrap().url, "front.jpg");
        assert_eq!(images.back().unwrap().url, "back.jpg");
    }

    #[test]
    fn test_positional_fallback() {
        let images = ProductImages::new(vec![
            Image::new("one.jpg", ImageRole::Unspecified),
            Image::new("two.jpg", ImageRole::Unspecified),
        ]);
        assert_eq!(images.front().unwrap().url, "one.jpg");
        assert_eq!(images.back().unwrap().url, "two.jpg");
    }

    #[test]
    fn test_single_image_has_no_back() {
        let images = ProductImages::new(vec![Image::new("only.jpg", ImageRole::Front)]);
        assert!(images.back().is_none());
        assert!(ProductImages::default().front().is_none());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(ImageRole::parse("FRONT"), ImageRole::Front);
        assert_eq!(ImageRole::parse("hover"), ImageRole::Back);
        assert_eq!(ImageRole::parse("thumbnail"), ImageRole::Unspecified);
    }
}
