use imgcrypt_metrics::analysis::ChannelKind;
use imgcrypt_metrics::report::{analyze_image, compare_images};
use imgcrypt_metrics::{AnalysisConfig, AnalysisError};
use ndarray::Array3;

fn gradient_image(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| match c {
        0 => (x * 255 / (width - 1)) as u8,
        1 => (y * 255 / (height - 1)) as u8,
        _ => ((x + y) * 127 / (width + height - 2)) as u8,
    })
}

/// Deterministic XOR keystream standing in for a cipher.
fn scramble(image: &Array3<u8>) -> Array3<u8> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    image.mapv(|v| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        v ^ (state >> 56) as u8
    })
}

#[test]
fn identical_images_have_perfect_fidelity() {
    let img = gradient_image(32, 32);
    let report = compare_images(img.view(), img.view(), &AnalysisConfig::default()).unwrap();

    assert_eq!(report.channels.len(), 3);
    for channel in &report.channels {
        let fidelity = channel.fidelity.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(fidelity.mse, 0.0);
        assert_eq!(fidelity.mae, 0.0);
        assert!(fidelity.psnr.is_infinite());
    }

    let luma = report.channel(ChannelKind::Luma).unwrap();
    let r = luma.inter_correlation.as_ref().unwrap().as_ref().unwrap();
    assert!((r - 1.0).abs() < 1e-12);
}

#[test]
fn scrambled_image_looks_random() {
    let plain = gradient_image(64, 64);
    let cipher = scramble(&plain);
    let report = compare_images(plain.view(), cipher.view(), &AnalysisConfig::default()).unwrap();

    let luma = report.channel(ChannelKind::Luma).unwrap();

    let inter = luma.inter_correlation.as_ref().unwrap().as_ref().unwrap();
    assert!(inter.abs() < 0.2, "inter-image correlation {}", inter);

    let horizontal = luma.adjacency.horizontal.as_ref().unwrap();
    assert!(horizontal.abs() < 0.2, "horizontal correlation {}", horizontal);

    let entropy = *luma.global_entropy.as_ref().unwrap();
    assert!(entropy > 7.0 && entropy <= 8.0, "entropy {}", entropy);

    let fidelity = luma.fidelity.as_ref().unwrap().as_ref().unwrap();
    assert!(fidelity.psnr < 20.0);
}

#[test]
fn plain_gradient_is_highly_correlated() {
    let img = gradient_image(64, 64);
    let report = analyze_image(img.view(), &AnalysisConfig::default().sequential()).unwrap();

    let luma = report.channel(ChannelKind::Luma).unwrap();
    assert!(*luma.adjacency.horizontal.as_ref().unwrap() > 0.9);
    assert!(*luma.adjacency.vertical.as_ref().unwrap() > 0.9);
    assert!(luma.inter_correlation.is_none());
    assert!(luma.fidelity.is_none());
}

#[test]
fn shape_mismatch_only_fails_pair_metrics() {
    let a = gradient_image(16, 16);
    let b = gradient_image(16, 24);
    let report = compare_images(a.view(), b.view(), &AnalysisConfig::default()).unwrap();

    for channel in &report.channels {
        assert!(matches!(
            channel.inter_correlation,
            Some(Err(AnalysisError::ShapeMismatch { .. }))
        ));
        assert!(matches!(channel.fidelity, Some(Err(AnalysisError::ShapeMismatch { .. }))));
        assert!(channel.global_entropy.is_ok());
        assert!(channel.local_entropy.is_ok());
    }
    assert!(report.has_failures());
}

#[test]
fn single_row_image_keeps_horizontal_adjacency() {
    let strip = Array3::from_shape_fn((1, 64, 3), |(_, x, c)| (x * 3 + c * 8) as u8);
    let report = analyze_image(strip.view(), &AnalysisConfig::default()).unwrap();

    let luma = report.channel(ChannelKind::Luma).unwrap();
    assert!(*luma.adjacency.horizontal.as_ref().unwrap() > 0.9);
    assert!(matches!(luma.adjacency.vertical, Err(AnalysisError::TooFewSamples(0))));
    assert!(matches!(luma.adjacency.diagonal, Err(AnalysisError::TooFewSamples(0))));
}

#[test]
fn invalid_peak_only_fails_fidelity() {
    let img = gradient_image(16, 16);
    let config = AnalysisConfig::default().with_max_pixel_value(0.0);
    let report = compare_images(img.view(), scramble(&img).view(), &config).unwrap();

    for channel in &report.channels {
        assert!(matches!(channel.fidelity, Some(Err(AnalysisError::InvalidPeak(_)))));
        assert!(matches!(channel.inter_correlation, Some(Ok(_))));
    }
}

#[test]
fn grayscale_input_is_rejected() {
    let gray = Array3::<u8>::zeros((8, 8, 1));
    assert!(matches!(
        analyze_image(gray.view(), &AnalysisConfig::default()),
        Err(AnalysisError::UnsupportedChannels(1))
    ));
}
