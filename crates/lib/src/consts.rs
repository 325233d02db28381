/// Prefix that marks an argument as a directive for loosego itself.
pub const DIRECTIVE_MARKER: char = '~';

/// Toolchain verb that activates the workspace pipeline.
pub const BUILD_VERB: &str = "build";

/// Value stored for a directive given without `=`.
pub const BARE_DIRECTIVE_VALUE: &str = "true";

pub const MODULE_DIRECTIVE: &str = "module";
pub const MOVE_VENDOR_DIRECTIVE: &str = "moveVendor";
pub const COPY_DIRECTIVE: &str = "copy";

pub const SOURCE_ROOT_ENV: &str = "GOPATH";
pub const TOOLCHAIN_ENV: &str = "LOOSEGO_GO";
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Environment override that forces the toolchain into GOPATH resolution.
pub const LEGACY_MODE_ENV: (&str, &str) = ("GO111MODULE", "off");

pub const MODULE_MANIFEST: &str = "go.mod";
pub const MODULE_CHECKSUMS: &str = "go.sum";
pub const VENDOR_DIR: &str = "vendor";
