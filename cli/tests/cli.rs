use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn asciify(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asciify"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

/// Black pixel then white pixel
fn write_black_white(dir: &Path) {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
    img.save(dir.join("bw.png")).unwrap();
}

#[test]
fn convert_writes_default_output() {
    let dir = tempdir().unwrap();
    write_black_white(dir.path());

    let out = asciify(dir.path(), &["convert", "-f", "bw.png"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read_to_string(dir.path().join("output.txt")).unwrap(), "Ñ ");
}

#[test]
fn convert_negative_trimmed_and_printed() {
    let dir = tempdir().unwrap();
    write_black_white(dir.path());

    let out = asciify(dir.path(), &["convert", "-f", "bw.png", "-n", "-A", "-o", "neg.txt"]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("neg.txt")).unwrap(), " Ñ");
    assert_eq!(String::from_utf8_lossy(&out.stdout), " Ñ\n");

    let out = asciify(dir.path(), &["convert", "-f", "bw.png", "--trim", "-o", "trim.txt"]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("trim.txt")).unwrap(), "Ñ");
}

#[test]
fn convert_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    write_black_white(dir.path());
    fs::write(dir.path().join("output.txt"), "keep").unwrap();

    let out = asciify(dir.path(), &["convert", "-f", "bw.png"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
    assert_eq!(fs::read_to_string(dir.path().join("output.txt")).unwrap(), "keep");

    let out = asciify(dir.path(), &["convert", "-f", "bw.png", "-r"]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(dir.path().join("output.txt")).unwrap(), "Ñ ");
}

#[test]
fn convert_rejects_bad_input() {
    let dir = tempdir().unwrap();
    write_black_white(dir.path());
    fs::write(dir.path().join("pic.bmp"), b"BM").unwrap();

    let out = asciify(dir.path(), &["convert", "-f", "bw.png", "-s", "0"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("need valid width/height or factor"));

    let out = asciify(dir.path(), &["convert", "-f", "pic.bmp"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported input type"));

    let out = asciify(dir.path(), &["convert"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("input file"));
}

#[test]
fn convert_saves_scaled_copy() {
    let dir = tempdir().unwrap();
    RgbImage::from_pixel(40, 20, Rgb([10, 200, 10]))
        .save(dir.path().join("green.jpg"))
        .unwrap();

    let out = asciify(
        dir.path(),
        &["convert", "-f", "green.jpg", "-w", "8", "-H", "4", "-m", "bilinear", "-c", "small.png"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let small = image::open(dir.path().join("small.png")).unwrap();
    assert_eq!((small.width(), small.height()), (8, 4));
    let text = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(text.split('\n').count(), 4);
}

#[test]
fn preview_prints_colour_blocks() {
    let dir = tempdir().unwrap();
    write_black_white(dir.path());

    let out = asciify(dir.path(), &["preview", "-f", "bw.png", "-w", "2", "-H", "1", "-S"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "\x1b[48;2;0;0;0m \x1b[0m\x1b[48;2;255;255;255m \x1b[0m\n"
    );
}

#[test]
fn help_lists_algorithms_in_order() {
    let dir = tempdir().unwrap();
    let out = asciify(dir.path(), &["convert", "--help"]);
    let help = String::from_utf8_lossy(&out.stdout);
    let near = help.find("near [").unwrap();
    let cat = help.find("cat [").unwrap();
    assert!(near < cat);
}

#[test]
fn cam_renders_each_frame() {
    let img = RgbImage::from_pixel(8, 4, Rgb([128, 128, 128]));
    let mut frame = Vec::new();
    JpegEncoder::new_with_quality(&mut frame, 90)
        .encode_image(&img)
        .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_asciify"))
        .args(["cam", "-s", "0.5"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(&frame).unwrap();
        stdin.write_all(&frame).unwrap();
    }
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.matches("\x1b[2J\x1b[H").count(), 2);
    let last = stdout.rsplit("\x1b[2J\x1b[H").next().unwrap();
    assert_eq!(last.trim_end_matches('\n').split('\n').count(), 2);
}
