//! Typed briefs describing the content to generate.

use crate::content::domain::ContentType;
use crate::gateway::{
    domain::{GatewayError, TextRequest},
    services::render_prompt,
};
use crate::language::Language;
use crate::operation::{OperationError, OperationResult, payload};
use crate::task::domain::Payload;
use crate::template::domain::{TemplateId, VariableValues};
use minijinja::context;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const GENERATION_TEMPERATURE: f32 = 0.7;

const SOCIAL_POST_PROMPT: &str = "Create an engaging {{ platform }} post about: {{ topic }}

Tone: {{ tone }}
Maximum length: {{ max_length }} characters
{{ hashtag_instruction }}

Post:";

const ARTICLE_PROMPT: &str = "Write an article titled \"{{ title }}\" about: {{ topic }}

Target audience: {{ audience }}
Target length: approximately {{ word_count }} words
{% if key_points %}Key points to cover:
{% for point in key_points %}- {{ point }}
{% endfor %}{% endif %}
Article:";

const DONOR_LETTER_PROMPT: &str = "Write a warm, personal thank-you letter to {{ donor_name }} for their donation of {{ amount }} to the {{ campaign }} campaign.
{% if story %}
Share this impact story:
{{ story }}
{% endif %}
Letter:";

const NEWSLETTER_PROMPT: &str = "Write a newsletter titled \"{{ title }}\" for {{ audience }}.

Sections:
{% for section in sections %}- {{ section }}
{% endfor %}
Newsletter:";

const HASHTAG_INSTRUCTION: &str = "Include 3-5 relevant hashtags at the end.";

const fn hashtag_instruction(include_hashtags: bool) -> &'static str {
    if include_hashtags {
        HASHTAG_INSTRUCTION
    } else {
        ""
    }
}

/// Brief for a social media post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPostBrief {
    /// Target platform, such as `facebook` or `instagram`.
    pub platform: String,
    /// Post topic or message.
    pub topic: String,
    /// Post tone.
    pub tone: String,
    /// Maximum post length in characters.
    pub max_length: u32,
    /// Whether to end the post with hashtags.
    pub include_hashtags: bool,
}

impl SocialPostBrief {
    /// Creates a professional post brief of at most 500 characters with
    /// hashtags.
    #[must_use]
    pub fn new(platform: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            topic: topic.into(),
            tone: "professional".to_owned(),
            max_length: 500,
            include_hashtags: true,
        }
    }

    /// Sets the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets whether hashtags are requested.
    #[must_use]
    pub const fn with_hashtags(mut self, include_hashtags: bool) -> Self {
        self.include_hashtags = include_hashtags;
        self
    }
}

/// Brief for a long-form article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleBrief {
    /// Article title.
    pub title: String,
    /// Article topic.
    pub topic: String,
    /// Intended readers.
    pub target_audience: String,
    /// Approximate length in words.
    pub word_count: u32,
    /// Points the article must cover.
    pub key_points: Vec<String>,
}

impl ArticleBrief {
    /// Creates an 800-word article brief for general readers.
    #[must_use]
    pub fn new(title: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topic: topic.into(),
            target_audience: "general readers".to_owned(),
            word_count: 800,
            key_points: Vec::new(),
        }
    }

    /// Sets the intended readers.
    #[must_use]
    pub fn with_audience(mut self, target_audience: impl Into<String>) -> Self {
        self.target_audience = target_audience.into();
        self
    }

    /// Sets the approximate length.
    #[must_use]
    pub const fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    /// Adds a point to cover.
    #[must_use]
    pub fn with_key_point(mut self, point: impl Into<String>) -> Self {
        self.key_points.push(point.into());
        self
    }
}

/// Brief for a donor thank-you letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorLetterBrief {
    /// Donor to address.
    pub donor_name: String,
    /// Donated amount.
    pub donation_amount: f64,
    /// Campaign that received the gift.
    pub campaign_name: String,
    /// Optional story of what the gift achieved.
    pub impact_story: Option<String>,
}

impl DonorLetterBrief {
    /// Creates a letter brief without an impact story.
    #[must_use]
    pub fn new(
        donor_name: impl Into<String>,
        donation_amount: f64,
        campaign_name: impl Into<String>,
    ) -> Self {
        Self {
            donor_name: donor_name.into(),
            donation_amount,
            campaign_name: campaign_name.into(),
            impact_story: None,
        }
    }

    /// Sets the impact story.
    #[must_use]
    pub fn with_impact_story(mut self, story: impl Into<String>) -> Self {
        self.impact_story = Some(story.into());
        self
    }

    fn amount(&self) -> String {
        format!("{:.2}", self.donation_amount)
    }
}

/// Brief for a newsletter edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterBrief {
    /// Edition title.
    pub title: String,
    /// Section headings in order.
    pub sections: Vec<String>,
    /// Intended readers.
    pub audience: String,
}

impl NewsletterBrief {
    /// Creates a newsletter brief without sections.
    #[must_use]
    pub fn new(title: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            audience: audience.into(),
        }
    }

    /// Appends a section.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.sections.push(section.into());
        self
    }
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum ContentBrief {
    /// A social media post.
    SocialPost(SocialPostBrief),
    /// A long-form article.
    Article(ArticleBrief),
    /// A donor thank-you letter.
    DonorLetter(DonorLetterBrief),
    /// A newsletter edition.
    Newsletter(NewsletterBrief),
}

impl ContentBrief {
    /// Returns the content type produced by the brief.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::SocialPost(_) => ContentType::SocialPost,
            Self::Article(_) => ContentType::Article,
            Self::DonorLetter(_) => ContentType::DonorLetter,
            Self::Newsletter(_) => ContentType::Newsletter,
        }
    }

    /// Checks the brief before any task is created.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] naming the first invalid
    /// field.
    pub fn validate(&self) -> OperationResult<()> {
        match self {
            Self::SocialPost(brief) => {
                require_text("platform", &brief.platform)?;
                require_text("topic", &brief.topic)?;
                require_positive("max_length", brief.max_length)
            }
            Self::Article(brief) => {
                require_text("title", &brief.title)?;
                require_text("topic", &brief.topic)?;
                require_positive("word_count", brief.word_count)
            }
            Self::DonorLetter(brief) => {
                require_text("donor_name", &brief.donor_name)?;
                require_text("campaign_name", &brief.campaign_name)?;
                if brief.donation_amount.is_finite() && brief.donation_amount > 0.0 {
                    Ok(())
                } else {
                    Err(invalid("donation_amount must be a positive amount"))
                }
            }
            Self::Newsletter(brief) => {
                require_text("title", &brief.title)?;
                if brief.sections.iter().any(|section| !section.trim().is_empty()) {
                    Ok(())
                } else {
                    Err(invalid("sections must name at least one section"))
                }
            }
        }
    }

    /// Values available to `{name}` placeholders of a stored template.
    #[must_use]
    pub fn variables(&self) -> VariableValues {
        let entries: Vec<(&str, String)> = match self {
            Self::SocialPost(brief) => vec![
                ("platform", brief.platform.clone()),
                ("topic", brief.topic.clone()),
                ("tone", brief.tone.clone()),
                ("max_length", brief.max_length.to_string()),
                ("include_hashtags", brief.include_hashtags.to_string()),
            ],
            Self::Article(brief) => vec![
                ("title", brief.title.clone()),
                ("topic", brief.topic.clone()),
                ("target_audience", brief.target_audience.clone()),
                ("word_count", brief.word_count.to_string()),
                ("key_points", brief.key_points.join("; ")),
            ],
            Self::DonorLetter(brief) => vec![
                ("donor_name", brief.donor_name.clone()),
                ("donation_amount", brief.amount()),
                ("campaign_name", brief.campaign_name.clone()),
                ("impact_story", brief.impact_story.clone().unwrap_or_default()),
            ],
            Self::Newsletter(brief) => vec![
                ("title", brief.title.clone()),
                ("audience", brief.audience.clone()),
                ("sections", brief.sections.join("; ")),
            ],
        };
        entries
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect()
    }

    /// Renders the built-in prompt for the brief.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Prompt`] when rendering fails.
    pub fn prompt(&self) -> Result<String, GatewayError> {
        match self {
            Self::SocialPost(brief) => render_prompt(
                SOCIAL_POST_PROMPT,
                context! {
                    platform => brief.platform,
                    topic => brief.topic,
                    tone => brief.tone,
                    max_length => brief.max_length,
                    hashtag_instruction => hashtag_instruction(brief.include_hashtags),
                },
            ),
            Self::Article(brief) => render_prompt(
                ARTICLE_PROMPT,
                context! {
                    title => brief.title,
                    topic => brief.topic,
                    audience => brief.target_audience,
                    word_count => brief.word_count,
                    key_points => brief.key_points,
                },
            ),
            Self::DonorLetter(brief) => render_prompt(
                DONOR_LETTER_PROMPT,
                context! {
                    donor_name => brief.donor_name,
                    amount => brief.amount(),
                    campaign => brief.campaign_name,
                    story => brief.impact_story,
                },
            ),
            Self::Newsletter(brief) => render_prompt(
                NEWSLETTER_PROMPT,
                context! {
                    title => brief.title,
                    audience => brief.audience,
                    sections => brief.sections,
                },
            ),
        }
    }

    /// Builds the provider request for an already rendered `prompt`.
    #[must_use]
    pub fn text_request(&self, prompt: &str) -> TextRequest {
        let (max_tokens, system_message) = match self {
            Self::SocialPost(_) => (500, "You are a social media expert creating engaging posts."),
            Self::Article(brief) => (
                brief.word_count.saturating_mul(2).clamp(500, 4000),
                "You are a skilled writer producing clear, well-structured articles.",
            ),
            Self::DonorLetter(_) => (
                800,
                "You are a nonprofit communications writer expressing sincere gratitude to donors.",
            ),
            Self::Newsletter(_) => (
                1500,
                "You are a newsletter editor writing concise, engaging updates.",
            ),
        };
        TextRequest::new(prompt)
            .with_max_tokens(max_tokens)
            .with_temperature(GENERATION_TEMPERATURE)
            .with_system_message(system_message)
    }

    /// Returns the title recorded on the generated content.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self {
            Self::SocialPost(_) => None,
            Self::Article(brief) => Some(brief.title.clone()),
            Self::DonorLetter(brief) => Some(format!("Thank you, {}", brief.donor_name)),
            Self::Newsletter(brief) => Some(brief.title.clone()),
        }
    }

    /// Returns the platform recorded on the generated content.
    #[must_use]
    pub fn platform(&self) -> Option<String> {
        match self {
            Self::SocialPost(brief) => Some(brief.platform.clone()),
            Self::Article(_) | Self::DonorLetter(_) | Self::Newsletter(_) => None,
        }
    }

    /// Returns the metadata recorded on the generated content.
    #[must_use]
    pub fn metadata(&self) -> Payload {
        match self {
            Self::SocialPost(brief) => payload([
                ("tone", json!(brief.tone)),
                ("include_hashtags", json!(brief.include_hashtags)),
            ]),
            Self::Article(brief) => payload([
                ("target_audience", json!(brief.target_audience)),
                ("word_count", json!(brief.word_count)),
                ("key_points", json!(brief.key_points)),
            ]),
            Self::DonorLetter(brief) => payload([
                ("campaign_name", json!(brief.campaign_name)),
                ("donation_amount", json!(brief.donation_amount)),
            ]),
            Self::Newsletter(brief) => payload([
                ("audience", json!(brief.audience)),
                ("sections", json!(brief.sections)),
            ]),
        }
    }

    /// Returns the brief as a task input payload.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] when the brief does not
    /// serialise to an object.
    pub fn input_data(&self) -> OperationResult<Payload> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(invalid(format!("brief serialised to {other}"))),
            Err(err) => Err(invalid(err.to_string())),
        }
    }
}

/// A generation call: the brief, its language, and an optional template.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// What to generate.
    pub brief: ContentBrief,
    /// Language of the generated content.
    pub language: Language,
    /// Stored template rendered instead of the built-in prompt.
    pub template_id: Option<TemplateId>,
}

impl GenerationRequest {
    /// Creates an English request using the built-in prompt.
    #[must_use]
    pub fn new(brief: ContentBrief) -> Self {
        Self {
            brief,
            language: Language::default(),
            template_id: None,
        }
    }

    /// Sets the content language.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Renders `template_id` instead of the built-in prompt.
    #[must_use]
    pub const fn with_template(mut self, template_id: TemplateId) -> Self {
        self.template_id = Some(template_id);
        self
    }
}

fn invalid(message: impl Into<String>) -> OperationError {
    OperationError::InvalidInput(message.into())
}

fn require_text(field: &str, value: &str) -> OperationResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> OperationResult<()> {
    if value == 0 {
        return Err(invalid(format!("{field} must be positive")));
    }
    Ok(())
}
