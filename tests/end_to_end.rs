use assert_approx_eq::assert_approx_eq;
use image::{Rgb, RgbImage};

use root_length_rust_lib::testing::ScriptedFrontend;
use root_length_rust_lib::{
    calibrate, reference_region, run_session, to_grayscale, Action, Config, RootLengthError, View,
};

const PAPER: Rgb<u8> = Rgb([235, 235, 235]);
const ROOT: Rgb<u8> = Rgb([40, 30, 20]);

/// Light scan with one long upright root and one square speck
fn scan() -> RgbImage {
    RgbImage::from_fn(400, 700, |x, y| {
        let root = (200..220).contains(&x) && (100..400).contains(&y);
        let speck = (320..340).contains(&x) && (500..520).contains(&y);
        if root || speck {
            ROOT
        } else {
            PAPER
        }
    })
}

fn config() -> Config {
    Config {
        reference_cursor_start: [0, 0],
        marker_size: 6,
        ..Config::default()
    }
}

fn calibration_script() -> Vec<Action> {
    let mut script = vec![Action::Confirm];
    script.extend(vec![Action::Right; 30]);
    script.extend(vec![Action::Down; 40]);
    script.push(Action::Confirm);
    script
}

#[test]
fn calibrate_then_measure() {
    let image = scan();
    let config = config();
    let mut script = calibration_script();
    script.extend([Action::ToggleColor, Action::ToggleColor, Action::Confirm]);
    let mut frontend = ScriptedFrontend::new(script);

    let region = reference_region(&image, config.reference_view_width, config.reference_view_height).unwrap();
    assert_eq!(region.dimensions(), (300, 600));

    let calibration = calibrate(&mut frontend, region, &config).unwrap();
    let scale = calibration.scale().unwrap();
    assert_approx_eq!(scale.pixels_per_unit(), 50.0, 1e-9);

    let gray = to_grayscale(&image);
    let outcome = run_session(&mut frontend, &gray, &image, scale, &config).unwrap();

    assert_eq!(frontend.remaining(), 0);
    assert!(!outcome.multi_color);
    assert_eq!(outcome.frame.measurements.len(), 1);

    let root = &outcome.frame.measurements[0];
    assert_eq!(root.source_bounds.x, 200);
    assert_eq!(root.source_bounds.y, 100);
    assert_eq!(root.source_bounds.width, 20);
    assert_eq!(root.source_bounds.height, 300);
    // two long sides of 300 px traced once each, over 2 * 50 px/unit
    assert!(root.length > 6.2 && root.length < 6.4, "length {}", root.length);

    // annotations on both views, speck left alone
    let color = frontend.last_rgb(View::Color).unwrap();
    assert_eq!(color.dimensions(), (400, 700));
    assert_eq!(*color.get_pixel(199, 250), Rgb([0, 255, 0]));
    assert_eq!(*color.get_pixel(330, 510), ROOT);
    assert_eq!(*color.get_pixel(319, 510), PAPER);

    let binary = frontend.last_gray(View::Binary).unwrap();
    assert!(binary.pixels().any(|p| p[0] != 0 && p[0] != 255));
    assert_eq!(binary.get_pixel(330, 510)[0], 255);

    // the source scan is never annotated
    assert_eq!(image, scan());
}

#[test]
fn coinciding_markers_stop_before_measuring() {
    let image = scan();
    let config = config();
    let mut frontend = ScriptedFrontend::new(vec![Action::Confirm, Action::Confirm]);

    let region = reference_region(&image, 300, 600).unwrap();
    let calibration = calibrate(&mut frontend, region, &config).unwrap();

    assert!(matches!(calibration.scale(), Err(RootLengthError::DegenerateScale(_))));
}

#[test]
fn escape_during_calibration_aborts() {
    let image = scan();
    let mut frontend = ScriptedFrontend::new(vec![Action::Right, Action::Quit]);
    let region = reference_region(&image, 300, 600).unwrap();

    let result = calibrate(&mut frontend, region, &config());
    assert!(matches!(result, Err(RootLengthError::CalibrationAborted)));
    // only the calibration view was ever shown
    assert!(frontend.last_rgb(View::Color).is_none());
    assert_eq!(frontend.shown_rgb.len(), 2);
}
