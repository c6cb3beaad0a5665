use image::ColorType;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs `translate-icon-gen -o <dir>` with the default sizes and asserts that
/// exactly icon16.png, icon48.png and icon128.png are produced and decodable.
#[test]
fn test_batch_render_writes_three_icons() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run_icon_gen(&["-o".as_ref(), output_dir.as_os_str()]);
    assert_success(&output);

    let mut names = file_names(&output_dir);
    names.sort();
    assert_eq!(names, vec!["icon128.png", "icon16.png", "icon48.png"]);

    for size in [16u32, 48, 128] {
        let path = output_dir.join(format!("icon{}.png", size));
        let metadata = std::fs::metadata(&path).expect("icon should exist");
        assert!(metadata.len() > 0, "{} should not be empty", path.display());

        let icon = image::open(&path).expect("icon should decode");
        assert_eq!(icon.width(), size);
        assert_eq!(icon.height(), size);
        assert_eq!(icon.color(), ColorType::Rgba8);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Created").count(), 3);
}

#[test]
fn test_every_preset_renders() {
    for preset in ["flat", "gradient", "gradient-sparkle"] {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output_dir = temp_dir.path().join(preset);

        let output = run_icon_gen(&[
            "--preset".as_ref(),
            preset.as_ref(),
            "--sizes".as_ref(),
            "48".as_ref(),
            "-o".as_ref(),
            output_dir.as_os_str(),
        ]);
        assert_success(&output);

        let icon = image::open(output_dir.join("icon48.png"))
            .expect("icon should decode")
            .to_rgba8();
        assert_eq!(icon.get_pixel(0, 0)[3], 0, "{} corner should be clear", preset);
        assert_eq!(icon.get_pixel(24, 2)[3], 255, "{} edge should be solid", preset);
    }
}

#[test]
fn test_manifest_flag_writes_fragment() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    let output = run_icon_gen(&["--manifest".as_ref(), "-o".as_ref(), output_dir.as_os_str()]);
    assert_success(&output);

    let content = std::fs::read_to_string(output_dir.join("icons.json"))
        .expect("icons.json should be written");
    let parsed: serde_json::Value =
        serde_json::from_str(&content).expect("icons.json should contain valid JSON");

    assert_eq!(parsed["icons"]["16"], "icons/icon16.png");
    assert_eq!(parsed["icons"]["48"], "icons/icon48.png");
    assert_eq!(parsed["icons"]["128"], "icons/icon128.png");
}

/// A missing master image produces no files and exactly one diagnostic naming it.
#[test]
fn test_missing_master_reports_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let master = temp_dir.path().join("missing_master.png");
    let output_dir = temp_dir.path().join("icons");

    let output = run_icon_gen(&[
        "--master".as_ref(),
        master.as_os_str(),
        "-o".as_ref(),
        output_dir.as_os_str(),
    ]);
    assert_success(&output);

    assert!(file_names(&output_dir).is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let master_display = master.display().to_string();
    let mentions = stderr
        .lines()
        .filter(|line| line.contains(&master_display))
        .count();
    assert_eq!(mentions, 1, "stderr was:\n{}", stderr);

    let diagnostics = stderr.lines().filter(|line| !line.trim().is_empty()).count();
    assert_eq!(diagnostics, 1, "stderr was:\n{}", stderr);
}

/// Resamples a real master image through the CLI.
#[test]
fn test_master_resize_through_cli() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let master = temp_dir.path().join("master.png");
    create_dummy_master(&master, 512);
    let output_dir = temp_dir.path().join("icons");

    let output = run_icon_gen(&[
        "--master".as_ref(),
        master.as_os_str(),
        "-o".as_ref(),
        output_dir.as_os_str(),
    ]);
    assert_success(&output);

    for size in [16u32, 48, 128] {
        let icon = image::open(output_dir.join(format!("icon{}.png", size)))
            .expect("icon should decode");
        assert_eq!((icon.width(), icon.height()), (size, size));
    }
}

fn run_icon_gen(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(get_icon_gen_binary_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run translate-icon-gen")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("translate-icon-gen command failed");
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn create_dummy_master(path: &Path, size: u32) {
    let image = image::RgbaImage::from_fn(size, size, |x, y| {
        let red = (255.0 * x as f32 / size as f32) as u8;
        let green = (255.0 * y as f32 / size as f32) as u8;
        image::Rgba([red, green, 128, 255])
    });

    image.save(path).expect("Failed to save dummy master");
}

fn get_icon_gen_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_translate-icon-gen"))
}
