use anyhow::Result;
use hotel_resolver::domain::HotelType;
use hotel_resolver::infra::InMemoryDocumentStore;
use hotel_resolver::{
    classify, HotelResolver, ResolutionOutcome, ResolverConfig, SourceCategory, SourceTag,
};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_store() -> Result<InMemoryDocumentStore> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/store_fixture.json");
    Ok(InMemoryDocumentStore::from_json_file(path)?)
}

fn resolver(store: &InMemoryDocumentStore) -> HotelResolver {
    HotelResolver::new(Arc::new(store.clone()), ResolverConfig::default())
}

#[tokio::test]
async fn test_every_demo_id_resolves_fully() -> Result<()> {
    let store = fixture_store()?;
    let resolver = resolver(&store);
    for n in 1..=20 {
        let id = n.to_string();
        let result = resolver.resolve(&id).await;
        assert_eq!(result.source_tag, SourceTag::Demo, "id {id}");
        assert_eq!(result.outcome, ResolutionOutcome::Demo);
        let entity = result.entity.expect("demo entity");
        assert_eq!(entity.id, id);
        assert!(!entity.room_types.is_empty());
        assert!(!entity.images.is_empty());
        assert_eq!(result.reviews.len(), 4);
        assert!(result.cross_sell_packages.is_empty());
        assert!(!result.used_fallback_source);
    }
    assert_eq!(store.total_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_boundary_twenty_one_is_not_found() -> Result<()> {
    let store = fixture_store()?;
    assert_eq!(classify("20"), SourceCategory::CuratedDemo);
    assert_eq!(classify("21"), SourceCategory::PersistentRecord);

    let result = resolver(&store).resolve("21").await;
    assert!(result.entity.is_none());
    assert!(!result.failed);
    assert_eq!(result.outcome, ResolutionOutcome::NotFound);
    assert_eq!(result.source_tag, SourceTag::None);
    assert!(result.is_not_found());
    assert_eq!(store.call_count("hotels"), 1);
    Ok(())
}

#[tokio::test]
async fn test_long_ids_are_external_and_skip_store() -> Result<()> {
    let store = fixture_store()?;
    let resolver = resolver(&store);
    for id in [
        "a".repeat(37),
        "123e4567-e89b-12d3-a456-426614174000-extra".to_string(),
        "ChIJabc".to_string(),
    ] {
        let result = resolver.resolve(&id).await;
        assert_eq!(result.source_tag, SourceTag::External, "id {id}");
        assert_eq!(result.outcome, ResolutionOutcome::External);
        assert_eq!(result.entity.as_ref().map(|e| e.id.as_str()), Some(id.as_str()));
        assert_eq!(result.reviews.len(), 4);
    }
    assert_eq!(store.total_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_persistent_hit_uses_real_reviews_and_packages() -> Result<()> {
    let store = fixture_store()?;
    let result = resolver(&store).resolve("hotel-9f3a7c").await;

    assert_eq!(result.source_tag, SourceTag::Persistent);
    assert_eq!(result.outcome, ResolutionOutcome::PersistentHit);
    assert!(!result.failed);

    let entity = result.entity.expect("stored entity");
    assert_eq!(entity.name, "Lagoon Edge Boutique Hotel");
    assert_eq!(entity.hotel_type, HotelType::Boutique);
    assert_eq!(entity.base_price_per_night, 135.0);
    assert_eq!(entity.room_types.len(), 2);
    assert_eq!(entity.images[0].alt_text.as_deref(), Some("Rooftop pool"));
    assert!(entity.images[0].is_primary && !entity.images[1].is_primary);
    assert_eq!(entity.city.map(|c| c.name), Some("Negombo".to_string()));
    assert!(entity.location.is_some());

    let review_ids: Vec<_> = result.reviews.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(review_ids, vec!["rev-1", "rev-2"]);

    assert_eq!(result.cross_sell_packages.len(), 2);
    let with_tour = result
        .cross_sell_packages
        .iter()
        .find(|p| p.id == "pkg-1")
        .expect("active package");
    assert_eq!(with_tour.tour.as_ref().map(|t| t.title.as_str()), Some("Muthurajawela Marsh Safari"));
    Ok(())
}

#[tokio::test]
async fn test_persistent_hit_without_reviews_does_not_synthesize() -> Result<()> {
    let store = fixture_store()?;
    let result = resolver(&store).resolve("hotel-2b81de").await;
    assert_eq!(result.outcome, ResolutionOutcome::PersistentHit);
    assert!(result.reviews.is_empty());

    let entity = result.entity.expect("stored entity");
    // eco_lodge is not a canonical type; "three" is not a number
    assert_eq!(entity.hotel_type, HotelType::MiddleRange);
    assert_eq!(entity.star_rating, 3);
    assert_eq!(entity.images.len(), 1);
    assert_eq!(entity.city.map(|c| c.name), Some("Haputale".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_room_type_failure_is_contained() -> Result<()> {
    let store = fixture_store()?;
    store.fail_collection("room_types");
    let result = resolver(&store).resolve("hotel-9f3a7c").await;
    assert!(!result.failed);
    let entity = result.entity.expect("entity survives");
    assert!(entity.room_types.is_empty());
    assert_eq!(entity.images.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_image_failure_falls_back_to_embedded_images() -> Result<()> {
    let store = fixture_store()?;
    store.fail_collection("hotel_images");
    let result = resolver(&store).resolve("hotel-9f3a7c").await;
    assert!(!result.failed);
    assert_eq!(result.outcome, ResolutionOutcome::PersistentHit);

    let entity = result.entity.expect("entity survives");
    assert_eq!(entity.room_types.len(), 2);
    assert_eq!(entity.city.map(|c| c.name), Some("Negombo".to_string()));
    assert_eq!(entity.images.len(), 2);
    assert!(entity.images[0].url.contains("photo-1571896349842"));
    assert!(entity.images[0].is_primary);
    assert!(entity.images.iter().skip(1).all(|img| !img.is_primary));
    Ok(())
}

#[tokio::test]
async fn test_resolution_is_idempotent() -> Result<()> {
    let store = fixture_store()?;
    let resolver = resolver(&store);
    for id in ["3", "12", "hotel-9f3a7c", "ChIJxyz"] {
        let first = resolver.resolve(id).await;
        let second = resolver.resolve(id).await;
        assert_eq!(first.entity, second.entity, "id {id}");
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.cross_sell_packages.len(), second.cross_sell_packages.len());
    }
    Ok(())
}

#[tokio::test]
async fn test_result_serializes_for_the_view_layer() -> Result<()> {
    let store = fixture_store()?;
    let result = resolver(&store).resolve("1").await;
    let json = serde_json::to_value(&result)?;
    assert_eq!(json["sourceTag"], "demo");
    assert_eq!(json["entity"]["hotelType"], "luxuryResort");
    assert_eq!(json["entity"]["images"][0]["isPrimary"], true);
    assert_eq!(json["reviews"].as_array().map(Vec::len), Some(4));
    Ok(())
}
