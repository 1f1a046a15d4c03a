//! Gateway capability tests over mocked and scripted providers.

use std::sync::Arc;
use std::time::Duration;

use crate::gateway::{
    adapters::{PLACEHOLDER_IMAGE_URL, PlaceholderImageGenerator, ScriptedTextGenerator},
    domain::{EnhancementKind, GatewayError, ImageSize, ProviderError, TextRequest, TextResponse},
    ports::MockTextGenerator,
    services::AiGateway,
};
use crate::language::Language;
use crate::quality::QualityScore;
use rstest::rstest;

const TIMEOUT: Duration = Duration::from_secs(5);

fn reply(text: &str) -> TextResponse {
    TextResponse {
        text: text.to_owned(),
        tokens_used: 42,
        model_used: "gpt-4".to_owned(),
    }
}

fn mocked(mock: MockTextGenerator) -> AiGateway<MockTextGenerator, PlaceholderImageGenerator> {
    AiGateway::new(Arc::new(mock), Arc::new(PlaceholderImageGenerator), TIMEOUT)
}

fn scripted(
    generator: ScriptedTextGenerator,
) -> AiGateway<ScriptedTextGenerator, PlaceholderImageGenerator> {
    AiGateway::new(
        Arc::new(generator),
        Arc::new(PlaceholderImageGenerator),
        TIMEOUT,
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn translate_uses_low_temperature_and_trims_output() {
    let mut mock = MockTextGenerator::new();
    mock.expect_generate()
        .withf(|request: &TextRequest| {
            request.temperature == Some(0.3)
                && request.prompt.contains("from English to Spanish")
                && request.prompt.ends_with("Hello\n\nTranslation:")
        })
        .times(1)
        .returning(|_| Ok(reply("  Hola \n")));

    let translation = mocked(mock)
        .translate("Hello", Language::En, Language::Es)
        .await
        .expect("translation succeeds");

    assert_eq!(translation.translated_text, "Hola");
    assert_eq!(translation.tokens_used, 42);
    assert_eq!(translation.model_used, "gpt-4");
    assert_eq!(translation.quality_score, QualityScore::DEFAULT_TRANSLATION);
}

#[tokio::test(flavor = "multi_thread")]
async fn translate_reports_configured_quality_score() {
    let mut mock = MockTextGenerator::new();
    mock.expect_generate().returning(|_| Ok(reply("Bonjour")));
    let score = QualityScore::new(0.5).expect("valid score");

    let translation = mocked(mock)
        .with_quality_score(score)
        .translate("Hello", Language::En, Language::Fr)
        .await
        .expect("translation succeeds");

    assert_eq!(translation.quality_score, score);
}

#[tokio::test(flavor = "multi_thread")]
async fn enhance_records_a_change_summary() {
    let mut mock = MockTextGenerator::new();
    mock.expect_generate()
        .withf(|request: &TextRequest| {
            request.temperature == Some(0.5)
                && request.prompt.starts_with("Adjust the tone of the following text to be warm:")
        })
        .returning(|_| Ok(reply(" Warmer text ")));

    let enhancement = mocked(mock)
        .enhance("Cold text", EnhancementKind::Tone, Some("warm"))
        .await
        .expect("enhancement succeeds");

    assert_eq!(enhancement.enhanced_text, "Warmer text");
    assert_eq!(enhancement.changes_made, vec!["Enhanced".to_owned()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn provider_failures_are_passed_through_without_retry() {
    let mut mock = MockTextGenerator::new();
    mock.expect_generate().times(1).returning(|_| {
        Err(ProviderError::Status {
            status: 503,
            body: "overloaded".to_owned(),
        })
    });

    let error = mocked(mock)
        .generate_text(&TextRequest::new("Hello"))
        .await
        .expect_err("provider fails");

    assert!(matches!(
        error,
        GatewayError::Provider(ProviderError::Status { status: 503, .. })
    ));
    assert!(error.kind().is_retryable());
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_provider_calls_time_out() {
    let generator = ScriptedTextGenerator::new().with_delay(Duration::from_millis(500));
    let gateway = AiGateway::new(
        Arc::new(generator),
        Arc::new(PlaceholderImageGenerator),
        Duration::from_millis(20),
    );

    let error = gateway
        .generate_text(&TextRequest::new("Hello"))
        .await
        .expect_err("call times out");

    assert_eq!(error, GatewayError::Timeout(Duration::from_millis(20)));
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_isolates_failures_and_keeps_order() {
    let generator = ScriptedTextGenerator::new()
        .reply_when("first", "one")
        .fail_when("second", ProviderError::Transport("reset".to_owned()))
        .reply_when("third", "three");
    let prompts = vec![
        "first prompt".to_owned(),
        "second prompt".to_owned(),
        "third prompt".to_owned(),
    ];

    let results = scripted(generator.clone()).batch(&prompts, 200, 0.9).await;

    assert_eq!(results.len(), 3);
    let texts: Vec<Option<&str>> = results
        .iter()
        .map(|result| result.as_ref().ok().map(|response| response.text.as_str()))
        .collect();
    assert_eq!(texts, vec![Some("one"), None, Some("three")]);
    assert!(generator.requests().iter().all(|request| {
        request.max_tokens == Some(200) && request.temperature == Some(0.9)
    }));
}

#[rstest]
#[case(ImageSize::Small)]
#[case(ImageSize::Landscape)]
#[tokio::test(flavor = "multi_thread")]
async fn image_generation_uses_the_placeholder_strategy(#[case] size: ImageSize) {
    let image = scripted(ScriptedTextGenerator::new())
        .generate_image("A sunrise", size)
        .await
        .expect("placeholder image");

    assert_eq!(image.image_url, PLACEHOLDER_IMAGE_URL);
    assert_eq!(image.size, size);
    assert_eq!(image.format, "jpg");
}
