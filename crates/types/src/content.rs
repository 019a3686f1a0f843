//! Static site content rendered inertly next to the navigation shell.
//!
//! The shell never mutates any of this; it only reads the bundle to draw the
//! page that matches the current route.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::MenuEntry;

/// Person the portfolio belongs to; drawn in the shell header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Landscape,
    Portrait,
    Square,
}

/// Alternate encodings for a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcSet {
    #[serde(default)]
    pub avif: Option<String>,
    #[serde(default)]
    pub webp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPhoto {
    pub id: String,
    pub src: String,
    #[serde(default)]
    pub src_set: Option<SrcSet>,
    pub alt: String,
    pub order: i32,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_taken: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Cycling,
    Tech,
    Volunteering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub category: PostCategory,
    /// ISO date (`YYYY-MM-DD`).
    pub publish_date: String,
    #[serde(default)]
    pub updated_date: Option<String>,
    #[serde(default)]
    pub featured_image: Option<ImageRef>,
    #[serde(default)]
    pub reading_time: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: PostStatus,
}

impl BlogPost {
    /// Parsed publish date, `None` when the bundle carries a malformed value.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.publish_date.trim(), "%Y-%m-%d").ok()
    }

    /// Publish date formatted for display ("January 15, 2024"), falling back
    /// to the raw value.
    pub fn display_date(&self) -> String {
        self.published_on()
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| self.publish_date.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub title: String,
    pub video_id: String,
    pub platform: VideoPlatform,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail: ImageRef,
    #[serde(default)]
    pub duration: Option<String>,
    pub order: i32,
    pub publish_date: String,
}

impl VideoItem {
    /// Player URL for the video; YouTube uses the privacy-enhanced host.
    pub fn embed_url(&self) -> Option<Url> {
        let base = match self.platform {
            VideoPlatform::Youtube => "https://www.youtube-nocookie.com/embed/",
            VideoPlatform::Vimeo => "https://player.vimeo.com/video/",
        };
        let id = self.video_id.trim();
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Url::parse(base).and_then(|url| url.join(id)).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLink {
    pub id: String,
    pub platform: String,
    pub icon: String,
    pub url: String,
    pub order: i32,
    pub aria_label: String,
}

/// Tile on the home page grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Dated line inside a page section (resume roles, timeline items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionItem {
    pub label: String,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub items: Vec<SectionItem>,
}

/// Inert listing appended below a page's static sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Listing {
    #[default]
    None,
    Portfolio,
    Gallery,
    Posts {
        category: PostCategory,
    },
    Videos,
    Contact {
        email: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub route: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<PageSection>,
    #[serde(default)]
    pub listing: Listing,
}

/// Everything the site bundle supplies: the menu plus the inert content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub profile: Profile,
    pub menu: Vec<MenuEntry>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default)]
    pub photos: Vec<PortfolioPhoto>,
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub videos: Vec<VideoItem>,
    #[serde(default)]
    pub social_links: Vec<SocialMediaLink>,
}

impl SiteContent {
    /// Page registered for exactly `route`.
    pub fn page_for(&self, route: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.route == route)
    }

    /// Published posts of `category`, newest first.
    pub fn published_posts(&self, category: PostCategory) -> Vec<&BlogPost> {
        let mut posts: Vec<&BlogPost> = self
            .posts
            .iter()
            .filter(|post| post.category == category && post.status == PostStatus::Published)
            .collect();
        posts.sort_by(|a, b| b.published_on().cmp(&a.published_on()).then_with(|| a.id.cmp(&b.id)));
        posts
    }

    pub fn ordered_photos(&self) -> Vec<&PortfolioPhoto> {
        let mut photos: Vec<&PortfolioPhoto> = self.photos.iter().collect();
        photos.sort_by_key(|photo| photo.order);
        photos
    }

    pub fn ordered_videos(&self) -> Vec<&VideoItem> {
        let mut videos: Vec<&VideoItem> = self.videos.iter().collect();
        videos.sort_by_key(|video| video.order);
        videos
    }

    pub fn ordered_social_links(&self) -> Vec<&SocialMediaLink> {
        let mut links: Vec<&SocialMediaLink> = self.social_links.iter().collect();
        links.sort_by_key(|link| link.order);
        links
    }
}
