use aso_common::{
    AppProfile,
    catalog::{ApplicationType, CountryCode, Kpi, Language, OptimizationTarget, Store},
};
use aso_generation::mock::{self, MockGenerator};
use aso_generation::traits::SuggestionGenerator;
use aso_generation::GenerationRequest;
use std::time::{Duration, Instant};

fn profile() -> AppProfile {
    AppProfile {
        app_id: "com.example.tasks".into(),
        store: Store::Apple,
        language: Language::English,
        country_code: CountryCode::new("US"),
        kpi: Kpi::KeywordRanking,
        optimization: OptimizationTarget::Subtitle,
        application_type: ApplicationType::AbcTest,
        instructions: "Focus on teams".into(),
        suggest_keywords: false,
    }
}

#[tokio::test]
async fn each_request_kind_maps_to_its_payload() -> aso_common::Result<()> {
    let generator = MockGenerator::instant();

    let initial = generator
        .generate(&GenerationRequest::Initial { profile: profile() })
        .await?;
    assert_eq!(initial, mock::initial_payload());

    let additional = generator
        .generate(&GenerationRequest::Additional {
            profile: profile(),
            instructions: "mention calendar sync".into(),
        })
        .await?;
    assert_eq!(additional, mock::additional_payload());

    let revised = generator
        .generate(&GenerationRequest::Revision {
            profile: profile(),
            round: 2,
            feedback: "shorter".into(),
        })
        .await?;
    assert!(revised.hypothesis.starts_with("Version 3: "));
    Ok(())
}

#[tokio::test]
async fn configured_delay_is_honoured() -> aso_common::Result<()> {
    let generator = MockGenerator::new(Duration::from_millis(30));
    let started = Instant::now();
    generator
        .generate(&GenerationRequest::Initial { profile: profile() })
        .await?;
    assert!(started.elapsed() >= Duration::from_millis(30));
    Ok(())
}

#[test]
fn prompt_carries_profile_and_revision() {
    let generator = MockGenerator::instant();
    let prompt = generator.build_prompt(&GenerationRequest::Revision {
        profile: profile(),
        round: 1,
        feedback: "less formal".into(),
    });
    assert!(prompt.contains("APP: com.example.tasks"));
    assert!(prompt.contains("ABC Test (3 variation(s))"));
    assert!(prompt.contains("REVISION REQUEST (round 1): \"less formal\""));
}

#[test]
fn request_serializes_with_kind_tag() {
    let json = serde_json::to_value(GenerationRequest::Initial { profile: profile() }).unwrap();
    assert_eq!(json["kind"], "initial");
    assert_eq!(json["profile"]["store"], "apple");
}
