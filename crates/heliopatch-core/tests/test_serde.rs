use heliopatch_core::detection::candidates::CandidateRegion;
use heliopatch_core::detection::components::BoundingBox;
use heliopatch_core::frame::DiskGeometry;
use heliopatch_core::pipeline::config::PipelineConfig;
use heliopatch_core::solar::grid::{GridLine, GridPoint, LineCoord};
use heliopatch_core::solar::orientation::OrientationParams;

#[test]
fn test_pipeline_config_from_empty_document() {
    let config: PipelineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.working_size, 2048);
    assert_eq!(config.patch_size, 512);
    assert_eq!(config.candidates.min_area, 10);
    assert_eq!(config.segmentation.morphology_kernel, 5);
}

#[test]
fn test_pipeline_config_partial_override() {
    let config: PipelineConfig = serde_json::from_str(
        r#"{"patch_size": 256, "candidates": {"merge_distance": 120.0}}"#,
    )
    .unwrap();
    assert_eq!(config.patch_size, 256);
    assert_eq!(config.candidates.merge_distance, 120.0);
    // Unset siblings keep their defaults.
    assert_eq!(config.candidates.max_merged_size, 300);
    assert_eq!(config.working_size, 2048);
}

#[test]
fn test_candidate_region_round_trip() {
    let region = CandidateRegion {
        cx: 1424.5,
        cy: 824.25,
        bbox: BoundingBox {
            min_row: 800,
            max_row: 850,
            min_col: 1400,
            max_col: 1450,
        },
    };
    let json = serde_json::to_string(&region).unwrap();
    let back: CandidateRegion = serde_json::from_str(&json).unwrap();
    assert_eq!(back, region);
}

#[test]
fn test_disk_and_orientation_round_trip() {
    let disk = DiskGeometry {
        cx: 1024.0,
        cy: 1020.5,
        r: 899.75,
    };
    let orientation = OrientationParams {
        b0: -6.5477,
        p0: -15.3966,
        l0: 210.3006,
    };
    let disk_back: DiskGeometry =
        serde_json::from_str(&serde_json::to_string(&disk).unwrap()).unwrap();
    let orient_back: OrientationParams =
        serde_json::from_str(&serde_json::to_string(&orientation).unwrap()).unwrap();
    assert_eq!(disk_back, disk);
    assert_eq!(orient_back, orientation);
}

#[test]
fn test_grid_line_tags_are_lowercase() {
    let line = GridLine {
        coord: LineCoord::Lat(15.0),
        points: vec![GridPoint { x: 10.0, y: 20.0 }],
    };
    let json = serde_json::to_string(&line).unwrap();
    assert!(json.contains(r#""lat":15.0"#), "unexpected JSON: {json}");

    let back: GridLine = serde_json::from_str(&json).unwrap();
    assert_eq!(back, line);
}
