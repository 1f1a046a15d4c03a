//! In-memory integration tests for generation, translation, and publishing.

use super::helpers::{Platform, actor, multilingual_provider};
use rstest::{fixture, rstest};
use scriptorium::content::domain::ContentType;
use scriptorium::generation::domain::{ContentBrief, GenerationRequest, SocialPostBrief};
use scriptorium::language::Language;
use scriptorium::publishing::{domain::PublishOptions, services::PublishingServiceError};
use scriptorium::task::domain::{TaskStatus, TaskType};
use scriptorium::template::domain::NewTemplate;
use scriptorium::translation::domain::TranslationStatus;

#[fixture]
fn platform() -> Platform {
    Platform::new(multilingual_provider())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_post_is_reviewed_and_published_once(platform: Platform) {
    let completed = platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("facebook", "our Saturday food drive"),
            None,
            actor("writer"),
        )
        .await
        .expect("generation succeeds");
    assert!(completed.task.requires_approval());
    assert!(!completed.task.is_approved());

    let approved = platform
        .tasks
        .approve(completed.task_id(), actor("editor"))
        .await
        .expect("approval succeeds");
    assert!(approved.is_approved());
    assert_eq!(approved.status(), TaskStatus::Completed);

    let published = platform
        .publishing
        .publish_content(completed.value.id(), PublishOptions::default())
        .await
        .expect("publish succeeds");
    assert_eq!(
        published.confirmation.external_id.as_deref(),
        Some("recorded-1")
    );
    assert!(published.content.is_published());

    let again = platform
        .publishing
        .publish_content(completed.value.id(), PublishOptions::default())
        .await
        .expect_err("second publish is refused");
    assert!(matches!(again, PublishingServiceError::AlreadyPublished(_)));
    assert_eq!(platform.publisher.published().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_content_is_translated_into_every_other_language(platform: Platform) {
    let completed = platform
        .generation
        .generate(
            GenerationRequest::new(ContentBrief::SocialPost(SocialPostBrief::new(
                "instagram",
                "volunteer week",
            ))),
            actor("writer"),
        )
        .await
        .expect("generation succeeds");

    let report = platform
        .translations
        .auto_translate_content(
            completed.value.id(),
            &[Language::En, Language::Es, Language::Fr],
            &actor("translator"),
        )
        .await
        .expect("auto translation succeeds");

    assert_eq!(report.source_language, Language::En);
    assert_eq!(report.succeeded(), 2);
    let spanish = report
        .translations
        .get(&Language::Es)
        .and_then(|outcome| outcome.success())
        .expect("spanish translation");
    assert_eq!(spanish.status(), TranslationStatus::Completed);
    assert_eq!(
        spanish.translated_text(),
        Some("¡Únete a nuestra colecta este sábado!")
    );

    let jobs = platform
        .translations
        .jobs_for_task(spanish.task_id())
        .await
        .expect("jobs lookup");
    assert_eq!(jobs.len(), 1);

    let stats = platform.tasks.statistics(None).await.expect("statistics");
    assert_eq!(stats.total, 3);
    assert_eq!(stats.by_type.get(&TaskType::Generation), Some(&1));
    assert_eq!(stats.by_type.get(&TaskType::Translation), Some(&2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_template_drives_the_prompt(platform: Platform) {
    let template = platform
        .templates
        .create(NewTemplate::new(
            "Event teaser",
            ContentType::SocialPost,
            "Tease {topic} on {platform} in a {tone} voice",
            actor("editor"),
        ))
        .await
        .expect("template created");

    platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("twitter", "the spring gala").with_tone("playful"),
            Some(template.id()),
            actor("writer"),
        )
        .await
        .expect("generation succeeds");

    let prompts: Vec<String> = platform
        .generator
        .requests()
        .into_iter()
        .map(|request| request.prompt)
        .collect();
    assert_eq!(
        prompts,
        vec!["Tease the spring gala on twitter in a playful voice".to_owned()]
    );
    let stored = platform.templates.get(template.id()).await.expect("template");
    assert_eq!(stored.usage_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn published_content_survives_in_listings(platform: Platform) {
    let completed = platform
        .generation
        .generate_social_post(
            SocialPostBrief::new("linkedin", "annual report"),
            None,
            actor("writer"),
        )
        .await
        .expect("generation succeeds");
    platform
        .publishing
        .publish_content(
            completed.value.id(),
            PublishOptions::default().with_platform("facebook"),
        )
        .await
        .expect("publish succeeds");

    let stored = platform
        .content
        .get(completed.value.id())
        .await
        .expect("content lookup");
    assert!(stored.is_published());
    let requests = platform.publisher.published();
    assert_eq!(
        requests.first().map(|request| request.platform.as_str()),
        Some("facebook")
    );
}
