//! Build script for sonar-rs
//!
//! With the `ovni` feature, this script points the linker at the ovni
//! installation named by `OVNI_HOME`. Without it, libovni must be found in
//! the default library search path.

fn main() {
	println!("cargo:rerun-if-env-changed=OVNI_HOME");

	if std::env::var_os("CARGO_FEATURE_OVNI").is_none() {
		return;
	}

	match std::env::var("OVNI_HOME") {
		Ok(home) => {
			println!("cargo:rustc-link-search=native={home}/lib");
			println!("cargo:rustc-link-search=native={home}/lib64");
		},
		Err(_) => println!("cargo:warning=OVNI_HOME not set, relying on the default library path for libovni"),
	}
}
