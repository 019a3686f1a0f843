//! Page text for the content area.
//!
//! Pages are flattened into styled lines wrapped to the available width; the
//! component only scrolls and draws them. Nothing here reads navigation state
//! besides the route.

use folio_types::{BlogPost, Listing, Page, PageSection, PostCategory, SiteContent};
use ratatui::text::{Line, Span};
use textwrap::Options;

use crate::ui::theme::Theme;

const INDENT: &str = "  ";

/// Styled lines for `route`, wrapped to `width` columns. Routes without a page
/// get a "not found" page.
pub fn page_lines(site: &SiteContent, route: &str, width: u16, theme: &dyn Theme) -> Vec<Line<'static>> {
    let width = usize::from(width.max(8));
    let mut writer = PageWriter {
        lines: Vec::new(),
        width,
        theme,
    };
    match site.page_for(route) {
        Some(page) => writer.page(site, page),
        None => writer.not_found(route),
    }
    writer.lines
}

struct PageWriter<'t> {
    lines: Vec<Line<'static>>,
    width: usize,
    theme: &'t dyn Theme,
}

impl PageWriter<'_> {
    fn page(&mut self, site: &SiteContent, page: &Page) {
        self.title(&page.title);
        for section in &page.sections {
            self.section(section);
        }
        match &page.listing {
            Listing::None => {}
            Listing::Portfolio => self.portfolio(site),
            Listing::Gallery => self.gallery(site),
            Listing::Posts { category } => self.posts(site, *category),
            Listing::Videos => self.videos(site),
            Listing::Contact { email } => self.contact(site, email),
        }
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
    }

    fn not_found(&mut self, route: &str) {
        self.title("Page not found");
        self.paragraph(&format!("Nothing lives at {route}."), "");
        self.paragraph("Press Backspace to go back, or pick a section from the menu.", "");
    }

    fn title(&mut self, title: &str) {
        self.lines.push(Line::from(Span::styled(title.to_string(), self.theme.heading_style())));
        self.blank();
    }

    fn heading(&mut self, heading: &str) {
        self.lines.push(Line::from(Span::styled(
            heading.to_string(),
            self.theme.accent_emphasis_style(),
        )));
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Wrapped paragraph; `indent` prefixes every line.
    fn paragraph(&mut self, text: &str, indent: &str) {
        let options = Options::new(self.width).initial_indent(indent).subsequent_indent(indent);
        let style = self.theme.text_secondary_style();
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        for line in textwrap::wrap(&normalized, options) {
            self.lines.push(Line::from(Span::styled(line.into_owned(), style)));
        }
        self.blank();
    }

    /// `label` in primary text followed by muted `meta`.
    fn labeled(&mut self, label: &str, meta: Option<&str>) {
        let mut spans = vec![Span::styled(label.to_string(), self.theme.text_primary_style())];
        if let Some(meta) = meta.filter(|meta| !meta.is_empty()) {
            spans.push(Span::styled(format!("  {meta}"), self.theme.text_muted_style()));
        }
        self.lines.push(Line::from(spans));
    }

    fn section(&mut self, section: &PageSection) {
        if let Some(heading) = section.heading.as_deref() {
            self.heading(heading);
        }
        for paragraph in &section.paragraphs {
            self.paragraph(paragraph, "");
        }
        for item in &section.items {
            self.labeled(&item.label, item.meta.as_deref());
            match item.text.as_deref() {
                Some(text) => self.paragraph(text, INDENT),
                None => self.blank(),
            }
        }
    }

    fn portfolio(&mut self, site: &SiteContent) {
        for item in &site.portfolio {
            self.labeled(&format!("▪ {}", item.title), None);
            self.paragraph(&item.description, INDENT);
        }
    }

    fn gallery(&mut self, site: &SiteContent) {
        for photo in site.ordered_photos() {
            let dimensions = format!("{}×{} {:?}", photo.width, photo.height, photo.aspect_ratio).to_lowercase();
            self.labeled(&photo.alt, Some(&dimensions));
            let details: Vec<&str> = [
                photo.caption.as_deref(),
                photo.location.as_deref(),
                photo.date_taken.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            if details.is_empty() {
                self.blank();
            } else {
                self.paragraph(&details.join(" · "), INDENT);
            }
        }
    }

    fn posts(&mut self, site: &SiteContent, category: PostCategory) {
        let posts = site.published_posts(category);
        if posts.is_empty() {
            self.paragraph("No posts yet.", "");
            return;
        }
        for post in posts {
            self.post(post);
        }
    }

    fn post(&mut self, post: &BlogPost) {
        let mut meta = post.display_date();
        if let Some(reading_time) = post.reading_time.as_deref() {
            meta.push_str(" · ");
            meta.push_str(reading_time);
        }
        self.heading(&post.title);
        self.lines
            .push(Line::from(Span::styled(meta, self.theme.text_muted_style())));
        let summary = post.excerpt.as_deref().unwrap_or(&post.content);
        self.paragraph(summary, INDENT);
        if !post.tags.is_empty() {
            let tags = post.tags.iter().map(|tag| format!("#{tag}")).collect::<Vec<_>>().join(" ");
            self.lines.pop();
            self.lines
                .push(Line::from(Span::styled(format!("{INDENT}{tags}"), self.theme.text_muted_style())));
            self.blank();
        }
    }

    fn videos(&mut self, site: &SiteContent) {
        for video in site.ordered_videos() {
            self.labeled(&video.title, video.duration.as_deref());
            if let Some(url) = video.embed_url() {
                self.lines
                    .push(Line::from(Span::styled(format!("{INDENT}{url}"), self.theme.link_style())));
            }
            match video.description.as_deref() {
                Some(description) => self.paragraph(description, INDENT),
                None => self.blank(),
            }
        }
    }

    fn contact(&mut self, site: &SiteContent, email: &str) {
        self.lines.push(Line::from(vec![
            Span::styled("Email  ", self.theme.text_muted_style()),
            Span::styled(email.to_string(), self.theme.link_style()),
        ]));
        for link in site.ordered_social_links() {
            self.lines.push(Line::from(vec![
                Span::styled(format!("{:<7}", capitalize(&link.platform)), self.theme.text_muted_style()),
                Span::styled(link.url.clone(), self.theme.link_style()),
            ]));
        }
        self.blank();
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
