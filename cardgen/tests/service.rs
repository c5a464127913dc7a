//! End-to-end: record -> service -> PNG on disk.

use cardgen::{BackgroundType, CardData, CardService, ImageConfig, doctor, user_message};
use data::{CombatCard, EquipmentCard, PlayerCard};

fn solid_config() -> ImageConfig {
    ImageConfig {
        background_type: BackgroundType::Solid,
        image_quality: cardgen::ImageQuality::Low,
        ..Default::default()
    }
}

fn player() -> CardData {
    CardData::Player(PlayerCard {
        name: "李逍遥".into(),
        cultivation: 500,
        ..Default::default()
    })
}

#[test]
fn render_to_file_follows_template() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = CardService::new(dir.path(), solid_config()).unwrap();

    let path = service.render_to_file(&player(), "10086").unwrap();
    assert_eq!(path.parent().unwrap(), dir.path().join("output"));

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("player_card_10086_"), "{name}");
    assert!(name.ends_with(".png"));

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (600, 400));
}

#[test]
fn layout_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = CardService::new(dir.path(), solid_config()).unwrap();
    for (_, path) in service.layout().dirs() {
        assert!(path.is_dir(), "{}", path.display());
    }
}

#[test]
fn second_render_is_served_from_cache() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = CardService::new(dir.path(), solid_config()).unwrap();
    let card = CardData::Combat(CombatCard::default());

    let first = service.render_to_file(&card, "u1").unwrap();
    let key = service.cache_key(&card).unwrap();
    assert_eq!(service.cache().len(), 1);
    assert!(service.cache().get(&key).is_some());

    let second = service.render_to_dir(&card, "u2", &dir.path().join("elsewhere")).unwrap();
    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
    assert_eq!(service.cache().len(), 1);
}

#[test]
fn cache_key_tracks_pixel_settings() {
    let dir = tempfile::TempDir::new().unwrap();
    let solid = CardService::new(dir.path(), solid_config()).unwrap();
    let themed = CardService::new(dir.path(), ImageConfig::default()).unwrap();
    let card = player();
    assert_ne!(solid.cache_key(&card).unwrap(), themed.cache_key(&card).unwrap());
}

#[test]
fn disabled_cache_writes_nothing_to_cache_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = solid_config();
    config.disable_feature("cache");
    let service = CardService::new(dir.path(), config).unwrap();

    service.render_to_file(&player(), "u1").unwrap();
    assert!(service.cache().is_empty());
}

#[test]
fn themed_render_is_deterministic_per_record() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ImageConfig {
        enable_cache: false,
        ..Default::default()
    };
    let service = CardService::new(dir.path(), config).unwrap();
    let card = CardData::Equipment(EquipmentCard {
        name: "青锋剑".into(),
        quality: "神品".into(),
        ..Default::default()
    });

    let a = service.render(&card).unwrap();
    let b = service.render(&card).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.dimensions(), (450, 350));
}

#[test]
fn png_bytes_decode() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = CardService::new(dir.path(), solid_config()).unwrap();
    let bytes = service.render_png(&player()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (600, 400));
}

#[test]
fn failure_message_for_players() {
    let err = CardData::from_json(data::CardKind::Player, "{").unwrap_err();
    assert!(user_message(&err).starts_with("生成卡片失败："));
}

#[test]
fn doctor_reports_writable_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let service = CardService::new(dir.path(), solid_config()).unwrap();
    let missing = dir.path().join("fonts").join("missing.otf");

    let report = doctor::diagnose(service.layout(), &[missing]);
    assert!(report.output_writable.is_ok());
    assert_eq!(report.font, render::FontSource::Builtin);
    assert!(!report.is_healthy());
    assert!(report.dirs.iter().all(|(_, _, present)| *present));

    let text = report.to_string();
    assert!(text.contains("✗"));
    assert!(text.contains("Output: ✓ writable"));
    assert!(text.contains("missing.otf (missing)"));
}

fn fixture_font() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../render/tests/fixtures/DejaVuSansMono.ttf")
}

#[test]
fn new_font_is_not_served_from_old_cache() {
    let dir = tempfile::TempDir::new().unwrap();
    let card = player();

    let before = CardService::new(dir.path(), solid_config()).unwrap();
    before.render_to_file(&card, "u1").unwrap();
    assert_eq!(before.cache().len(), 1);

    let installed = dir.path().join("fonts").join("SourceHanSansCN-Regular.otf");
    std::fs::copy(fixture_font(), &installed).unwrap();
    let after = CardService::new(dir.path(), solid_config()).unwrap();
    assert_eq!(after.renderer().font().source(), &render::FontSource::File(installed));
    assert_ne!(before.cache_key(&card).unwrap(), after.cache_key(&card).unwrap());

    let served = after.render_to_file(&card, "u2").unwrap();
    assert_eq!(std::fs::read(served).unwrap(), after.render_png(&card).unwrap());
    assert_eq!(after.cache().len(), 2);
}

#[test]
fn theme_texture_moves_cache_key() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ImageConfig {
        background_type: BackgroundType::Texture,
        ..Default::default()
    };
    let service = CardService::new(dir.path(), config).unwrap();
    let card = player();

    let plain = service.cache_key(&card).unwrap();
    let texture = service.layout().textures.join("xiuxian.png");
    image::RgbaImage::from_pixel(8, 8, image::Rgba([90, 40, 160, 255])).save(&texture).unwrap();
    let textured = service.cache_key(&card).unwrap();
    assert_ne!(plain, textured);

    image::RgbaImage::from_pixel(16, 16, image::Rgba([10, 200, 30, 255])).save(&texture).unwrap();
    assert_ne!(textured, service.cache_key(&card).unwrap());
}
