use std::env;
use std::path::Path;

// Cargo reports PROFILE as "release" for every profile inheriting from it, so
// custom profiles are recognised from the target directory name instead.
fn profile_name() -> String {
    let out_dir = env::var("OUT_DIR").unwrap_or_default();
    let from_target_dir = Path::new(&out_dir)
        .ancestors()
        .filter_map(|dir| dir.file_name().and_then(|name| name.to_str()))
        .find(|name| matches!(*name, "profiling" | "release" | "debug"))
        .map(str::to_string);

    from_target_dir
        .or_else(|| env::var("PROFILE").ok())
        .unwrap_or_else(|| "debug".to_string())
}

fn main() {
    // Pick the demo's log level from the build profile
    println!("cargo:rustc-check-cfg=cfg(rts_camera_log, values(\"warn\", \"info\", \"debug\"))");

    match profile_name().as_str() {
        "release" => {
            // Warnings and errors only in release builds
            println!("cargo:rustc-cfg=rts_camera_log=\"warn\"");
        }
        "profiling" => {
            println!("cargo:rustc-cfg=rts_camera_log=\"info\"");
        }
        _ => {
            // Full camera diagnostics for debug builds
            println!("cargo:rustc-cfg=rts_camera_log=\"debug\"");
        }
    }

    println!("cargo:rerun-if-env-changed=PROFILE");
}
