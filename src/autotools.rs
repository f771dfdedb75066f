// src/autotools.rs

//! The autotools package contract
//!
//! Ties a descriptor to the operations the orchestrator invokes during a
//! build. The external sequence is fixed: resolve, fetch, verify,
//! autoreconf (when forced), configure, per-category flag handling,
//! build, install, artifact check. Everything here is synchronous and
//! stateless; the orchestrator owns all I/O except the final artifact
//! walk.

use crate::artifacts;
use crate::configure;
use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use crate::flags::{Compiler, FlagCategory, HandledFlags};
use crate::spec::ResolvedSpec;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An autotools-built package: a descriptor plus its build-time hooks
pub trait AutotoolsPackage {
    /// The static declaration backing this package
    fn descriptor(&self) -> &PackageDescriptor;

    /// File stem of the library this package installs (`libfoo`)
    fn lib_stem(&self) -> &str;

    /// Whether configure must be regenerated via autoreconf every build
    ///
    /// Defaults to the descriptor's declaration. Packages whose shipped
    /// configure script is unreliable override this to `true`.
    fn force_autoreconf(&self) -> bool {
        self.descriptor().force_autoreconf()
    }

    /// Render the configure arguments for a resolved spec
    ///
    /// One argument per toggle-table row, in table order.
    fn configure_args(&self, spec: &ResolvedSpec<'_>) -> Vec<String> {
        configure::args_for(spec)
    }

    /// Adjust one category's flag list before configure runs
    ///
    /// The default handler passes every category through untouched,
    /// routed into the build-system slot of [`HandledFlags`].
    fn handle_flags(
        &self,
        category: FlagCategory,
        flags: Vec<String>,
        spec: &ResolvedSpec<'_>,
        compiler: &dyn Compiler,
    ) -> Result<HandledFlags> {
        let _ = (spec, compiler);
        debug!("Passing {} through unchanged", category);
        Ok(HandledFlags::build_system(flags))
    }

    /// Locate the installed libraries under a prefix
    ///
    /// Recursive shared-library search for [`Self::lib_stem`]. An empty
    /// result is a post-build contract violation, reported as
    /// [`Error::ArtifactNotFound`].
    fn libs(&self, prefix: &Path) -> Result<Vec<PathBuf>> {
        let found = artifacts::find_libraries(self.lib_stem(), prefix, true, true);
        if found.is_empty() {
            return Err(Error::ArtifactNotFound(format!(
                "{} under {}",
                self.lib_stem(),
                prefix.display()
            )));
        }
        Ok(found)
    }
}
