//! Build script: stamps the release version into the binary.
fn main() {
    // Release builds stamp the version through INTERCITY_SERVER_VERSION;
    // local builds fall back to the package version.
    if let Ok(version) = std::env::var("INTERCITY_SERVER_VERSION")
        && !version.trim().is_empty()
    {
        println!("cargo:rustc-env=INTERCITY_SERVER_VERSION={}", version.trim());
    }

    println!("cargo:rerun-if-env-changed=INTERCITY_SERVER_VERSION");
}
