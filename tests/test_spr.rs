use spaceko_cli::config::BandThresholds;
use spaceko_cli::spr::*;

#[test]
fn test_spr_very_low() {
    let result = spr_and_band(150.0, 100.0);
    assert_eq!(result.band, SprBand::VeryLow);
    assert!((result.ratio - 1.5).abs() < 0.01);
}

#[test]
fn test_spr_low() {
    let result = spr_and_band(300.0, 100.0);
    assert_eq!(result.band, SprBand::Low);
}

#[test]
fn test_spr_medium() {
    let result = spr_and_band(500.0, 100.0);
    assert_eq!(result.band, SprBand::Medium);
}

#[test]
fn test_spr_high() {
    let result = spr_and_band(1000.0, 100.0);
    assert_eq!(result.band, SprBand::High);
}

#[test]
fn test_spr_very_high() {
    let result = spr_and_band(100.0, 6.0);
    assert_eq!(result.band, SprBand::VeryHigh);
    assert!((result.ratio - 16.67).abs() < 0.01);
}

#[test]
fn test_spr_zero_pot() {
    let result = spr_and_band(100.0, 0.0);
    assert_eq!(result.ratio, 0.0);
    assert_eq!(result.band, SprBand::VeryLow);
    assert!(!result.ratio.is_infinite());
}

#[test]
fn test_spr_str() {
    let result = spr_and_band(200.0, 100.0);
    let s = format!("{}", result);
    assert!(s.contains("2.0"));
    assert!(s.contains("low"));
}

#[test]
fn test_banding_is_monotonic_and_total() {
    let th = BandThresholds::default();
    let mut last = SprBand::VeryLow;
    let mut seen = Vec::new();
    for i in 0..=4_000 {
        let band = SprBand::classify(i as f64 * 0.01, &th);
        assert!(band >= last, "band dropped at SPR {}", i as f64 * 0.01);
        if !seen.contains(&band) {
            seen.push(band);
        }
        last = band;
    }
    assert_eq!(seen, SprBand::ALL.to_vec());
}

#[test]
fn test_custom_thresholds() {
    let th = BandThresholds {
        spr: [1.0, 3.0, 10.0, 20.0],
        ..BandThresholds::default()
    };
    assert_eq!(spr_and_band_with(5.0, 1.0, &th).band, SprBand::Medium);
    assert_eq!(spr_and_band_with(15.0, 1.0, &th).band, SprBand::High);
}

#[test]
fn test_every_band_has_guidance() {
    for band in SprBand::ALL {
        assert!(!band.guidance().is_empty());
    }
}
