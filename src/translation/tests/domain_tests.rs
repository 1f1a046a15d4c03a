//! Translation job state machine tests.

use crate::language::Language;
use crate::quality::QualityScore;
use crate::task::domain::TaskId;
use crate::translation::domain::{
    NewTranslationJob, TranslationDomainError, TranslationJob, TranslationStatus,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn job() -> TranslationJob {
    TranslationJob::new(
        NewTranslationJob {
            task_id: TaskId::new(),
            source_language: Language::En,
            target_language: Language::Pt,
            source_text: "Thank you".to_owned(),
        },
        &DefaultClock,
    )
    .expect("valid job")
}

#[rstest]
fn new_jobs_are_pending_without_output(job: TranslationJob) {
    assert_eq!(job.status(), TranslationStatus::Pending);
    assert_eq!(job.translated_text(), None);
    assert_eq!(job.quality_score(), None);
}

#[test]
fn blank_source_text_is_rejected() {
    let result = TranslationJob::new(
        NewTranslationJob {
            task_id: TaskId::new(),
            source_language: Language::En,
            target_language: Language::Es,
            source_text: "  ".to_owned(),
        },
        &DefaultClock,
    );
    assert_eq!(result, Err(TranslationDomainError::EmptySourceText));
}

#[rstest]
fn completed_jobs_carry_translated_text(mut job: TranslationJob) {
    job.begin(&DefaultClock).expect("begin");
    job.complete("Obrigado".to_owned(), QualityScore::DEFAULT_TRANSLATION, &DefaultClock)
        .expect("complete");

    assert_eq!(job.status(), TranslationStatus::Completed);
    assert_eq!(job.translated_text(), Some("Obrigado"));
    assert_eq!(job.quality_score(), Some(QualityScore::DEFAULT_TRANSLATION));
}

#[rstest]
fn pending_jobs_cannot_complete(mut job: TranslationJob) {
    let result = job.complete(
        "Obrigado".to_owned(),
        QualityScore::DEFAULT_TRANSLATION,
        &DefaultClock,
    );

    assert!(matches!(
        result,
        Err(TranslationDomainError::InvalidStateTransition {
            from: TranslationStatus::Pending,
            to: TranslationStatus::Completed,
            ..
        })
    ));
    assert_eq!(job.translated_text(), None);
}

#[rstest]
fn failed_jobs_record_the_error_without_text(mut job: TranslationJob) {
    job.begin(&DefaultClock).expect("begin");
    job.fail("provider down", &DefaultClock).expect("fail");

    assert_eq!(job.status(), TranslationStatus::Failed);
    assert_eq!(job.error_message(), Some("provider down"));
    assert_eq!(job.translated_text(), None);
}

#[rstest]
#[case("pending", TranslationStatus::Pending)]
#[case("PROCESSING", TranslationStatus::Processing)]
#[case("completed", TranslationStatus::Completed)]
#[case("failed", TranslationStatus::Failed)]
fn statuses_parse(#[case] raw: &str, #[case] expected: TranslationStatus) {
    assert_eq!(TranslationStatus::try_from(raw), Ok(expected));
}
