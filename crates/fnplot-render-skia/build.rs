// File: crates/fnplot-render-skia/build.rs
// Summary: Link the Windows system libraries Skia's font manager and ICU need.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW and friends
        println!("cargo:rustc-link-lib=advapi32");
    }
}
