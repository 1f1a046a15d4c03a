//! Domain model for generation requests.

mod brief;

pub use brief::{
    ArticleBrief, ContentBrief, DonorLetterBrief, GenerationRequest, NewsletterBrief,
    SocialPostBrief,
};
