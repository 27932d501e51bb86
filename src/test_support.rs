//! Shell scripts standing in for ffmpeg in tests.
//!
//! Each script takes the output path from its last argument, the way ffmpeg
//! does, and never reads the input.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// What the fake transcoder does when invoked
#[derive(Debug, Clone, Copy)]
pub enum FakeBehavior {
    /// Exit 0 and write a non-empty output
    Encode,
    /// Exit 1 with a message on stderr, no output
    Fail,
    /// Exit 0 without writing anything
    NoOutput,
    /// Exit 0 after creating an empty output
    EmptyOutput,
    /// Fail for inputs whose path contains the pattern, encode the rest
    FailMatching(&'static str),
}

pub const ENCODED_BYTES: &[u8] = b"h264-reencoded-output";

pub fn fake_ffmpeg(dir: &Path, behavior: FakeBehavior) -> PathBuf {
    let encode = format!(
        "for last; do :; done\nprintf '%s' '{}' > \"$last\"\n",
        String::from_utf8_lossy(ENCODED_BYTES)
    );
    let fail = "echo 'simulated encoder failure' >&2\nexit 1\n".to_string();

    let (name, body) = match behavior {
        FakeBehavior::Encode => ("ffmpeg-encode", encode),
        FakeBehavior::Fail => ("ffmpeg-fail", fail),
        FakeBehavior::NoOutput => ("ffmpeg-no-output", "exit 0\n".to_string()),
        FakeBehavior::EmptyOutput => (
            "ffmpeg-empty",
            "for last; do :; done\n: > \"$last\"\n".to_string(),
        ),
        FakeBehavior::FailMatching(pattern) => (
            "ffmpeg-selective",
            format!("case \"$*\" in *{pattern}*)\n{fail};;\nesac\n{encode}"),
        ),
    };

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
