use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn main() {
    let compiled_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let branch =
        git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".into());

    println!("cargo:rustc-env=SADDLE_COMPILED_AT={compiled_at}");
    println!("cargo:rustc-env=SADDLE_GIT_COMMIT={commit}");
    println!("cargo:rustc-env=SADDLE_GIT_BRANCH={branch}");
    println!("cargo:rustc-env=SADDLE_BUILD_PROFILE={profile}");
    println!("cargo:rustc-env=SADDLE_BUILD_TARGET={target}");
}
