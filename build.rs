// System LAPACK backends are not linked by their `*-src` crates
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if cfg!(any(feature = "openblas-system", feature = "netlib-system")) {
        for lib in ["lapacke", "lapack", "cblas"].iter() {
            println!("cargo:rustc-link-lib={}", lib);
        }
    }
}
