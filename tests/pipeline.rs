#![cfg(feature = "std")]

use std::fs;

use bmpfilter::*;
use enough::{StopReason, Unstoppable};

struct AlwaysCancel;

impl Stop for AlwaysCancel {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

fn write_sample(path: &std::path::Path, w: u32, h: u32) -> Vec<u8> {
    let mut image = Image::new_24bit(w, h).unwrap();
    for (i, b) in image.pixels_mut().as_bytes_mut().iter_mut().enumerate() {
        *b = (i * 31 % 256) as u8;
    }
    let bytes = encode_bmp(&image, Unstoppable).unwrap();
    fs::write(path, &bytes).unwrap();
    bytes
}

#[test]
fn invert_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bmp");
    let dst = dir.path().join("out.bmp");
    let original = write_sample(&src, 5, 3);

    let report = Pipeline::new(Transform::Invert).run(&src, &dst).unwrap();
    assert_eq!(report.transform, Transform::Invert);
    assert_eq!((report.width, report.height), (5, 3));
    assert_eq!(report.bytes_read, original.len());
    assert_eq!(report.bytes_written, original.len());

    let out = fs::read(&dst).unwrap();
    assert_eq!(&out[..HEADER_LEN], &original[..HEADER_LEN]);
    let src_img = decode_bmp(&original, Unstoppable).unwrap();
    let dst_img = decode_bmp(&out, Unstoppable).unwrap();
    for (a, b) in src_img
        .pixels()
        .as_bytes()
        .iter()
        .zip(dst_img.pixels().as_bytes())
    {
        assert_eq!(255 - a, *b);
    }
}

#[test]
fn reflect_twice_restores_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bmp");
    let mid = dir.path().join("mid.bmp");
    let dst = dir.path().join("out.bmp");
    let original = write_sample(&src, 7, 5);

    let pipeline = Pipeline::from_name("reflectY").unwrap();
    pipeline.run(&src, &mid).unwrap();
    pipeline.run(&mid, &dst).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), original);
}

#[test]
fn bad_magic_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("bad.bmp");
    let dst = dir.path().join("out.bmp");
    let mut bytes = write_sample(&src, 2, 2);
    bytes[0] = b'X';
    bytes[1] = b'X';
    fs::write(&src, &bytes).unwrap();

    let err = Pipeline::new(Transform::Invert).run(&src, &dst).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Bitmap(BitmapError::InvalidFormat(_))
    ));
    assert!(!dst.exists());
    // No stray temp files either.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_decode_keeps_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("short.bmp");
    let dst = dir.path().join("out.bmp");
    let bytes = write_sample(&src, 4, 4);
    fs::write(&src, &bytes[..bytes.len() - 5]).unwrap();
    fs::write(&dst, b"previous").unwrap();

    let err = Pipeline::new(Transform::Sepia).run(&src, &dst).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Bitmap(BitmapError::TruncatedData { .. })
    ));
    assert_eq!(fs::read(&dst).unwrap(), b"previous");
}

#[test]
fn missing_source_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Pipeline::new(Transform::Grayscale)
        .run(dir.path().join("nope.bmp"), dir.path().join("out.bmp"))
        .unwrap_err();
    match err {
        PipelineError::Read { path, .. } => assert!(path.ends_with("nope.bmp")),
        other => panic!("expected Read, got {other:?}"),
    }
}

#[test]
fn missing_destination_dir_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bmp");
    write_sample(&src, 2, 2);
    let dst = dir.path().join("no-such-dir").join("out.bmp");
    for atomic in [true, false] {
        let err = Pipeline::new(Transform::Tint)
            .atomic(atomic)
            .run(&src, &dst)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }), "atomic={atomic}");
    }
}

#[test]
fn limits_apply_to_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bmp");
    let dst = dir.path().join("out.bmp");
    write_sample(&src, 8, 8);
    let err = Pipeline::new(Transform::Dusk)
        .with_limits(Limits {
            max_width: Some(4),
            ..Default::default()
        })
        .run(&src, &dst)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Bitmap(BitmapError::LimitExceeded(_))
    ));
    assert!(!dst.exists());
}

#[test]
fn unknown_transform_name() {
    assert!(matches!(
        Pipeline::from_name("emboss"),
        Err(BitmapError::UnknownTransform(_))
    ));
}

#[test]
fn cancelled_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.bmp");
    let dst = dir.path().join("out.bmp");
    write_sample(&src, 6, 20);

    for atomic in [true, false] {
        let err = Pipeline::new(Transform::Sepia)
            .atomic(atomic)
            .run_with_stop(&src, &dst, AlwaysCancel)
            .unwrap_err();
        assert!(
            matches!(
                err,
                PipelineError::Bitmap(BitmapError::Cancelled(StopReason::Cancelled))
            ),
            "atomic={atomic}: {err:?}"
        );
        assert!(!dst.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
