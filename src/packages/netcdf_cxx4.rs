// src/packages/netcdf_cxx4.rs

//! NetCDF C++ bindings
//!
//! NetCDF (network Common Data Form) is a set of software libraries and
//! machine-independent data formats for array-oriented scientific data.
//! This descriptor covers the C++ distribution, which builds against an
//! installed netcdf-c.

use crate::autotools::AutotoolsPackage;
use crate::configure::FlagStyle;
use crate::depend::DepKind;
use crate::descriptor::PackageDescriptor;
use crate::error::Result;
use crate::flags::{Compiler, FlagCategory, HandledFlags};
use crate::spec::ResolvedSpec;

/// The C library this binding compiles and links against
const NETCDF_C: &str = "netcdf-c";

/// The NetCDF C++ binding package
#[derive(Debug)]
pub struct NetcdfCxx4 {
    descriptor: PackageDescriptor,
}

impl NetcdfCxx4 {
    pub fn new() -> Self {
        Self {
            descriptor: descriptor(),
        }
    }
}

impl Default for NetcdfCxx4 {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the netcdf-cxx4 descriptor
///
/// The toggle table is stored in emission order, which is not the
/// variant declaration order; the netcdf4 variant renders as
/// `netcdf-4` on the configure line.
pub fn descriptor() -> PackageDescriptor {
    PackageDescriptor::builder(
        "netcdf-cxx4",
        "ftp://ftp.unidata.ucar.edu/pub/netcdf/netcdf-cxx4-%(version)s.tar.gz",
    )
    .homepage("https://www.unidata.ucar.edu/software/netcdf")
    .summary("NetCDF C++ bindings for array-oriented scientific data")
    .maintainer("WardF")
    .version(
        "4.3.1",
        "sha256:6a1189a181eed043b5859e15d5c080c30d0e107406fbb212c8fb9814e90f3445",
    )
    .version(
        "4.3.0",
        "sha256:e34fbc6aba243ec82c23e9ee99db2430555ada849c54c1f3ab081b0ddd0f5f30",
    )
    .variant("static", true, "Enable building static libraries")
    .variant("shared", true, "Enable shared library")
    // configure usually inserts the pic flags itself; the variant forces them
    .variant(
        "pic",
        true,
        "Produce position-independent code (for shared libs)",
    )
    .variant("dap", false, "Enable DAP support")
    .variant("jna", false, "Enable JNA support")
    .variant("doxygen", true, "Enable doxygen docs")
    .variant("ncgen4", true, "Enable generating netcdf-4 data")
    .variant("pnetcdf", true, "Enable parallel-netcdf")
    .variant("netcdf4", false, "Enable netcdf-4 data structure")
    .dependency(NETCDF_C, DepKind::BuildLink)
    .dependency("automake", DepKind::Build)
    .dependency("autoconf", DepKind::Build)
    .dependency("libtool", DepKind::Build)
    .dependency("m4", DepKind::Build)
    .conflict("~shared", "~static")
    .toggle("static", FlagStyle::EnableDisable)
    .toggle("shared", FlagStyle::EnableDisable)
    .toggle("pic", FlagStyle::WithWithout)
    .toggle("dap", FlagStyle::EnableDisable)
    .toggle("jna", FlagStyle::EnableDisable)
    .toggle("pnetcdf", FlagStyle::EnableDisable)
    .toggle_as("netcdf4", "netcdf-4", FlagStyle::EnableDisable)
    .toggle("ncgen4", FlagStyle::EnableDisable)
    .toggle("doxygen", FlagStyle::EnableDisable)
    .force_autoreconf(true)
    .build()
    .expect("netcdf-cxx4 descriptor table is valid")
}

impl AutotoolsPackage for NetcdfCxx4 {
    fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    fn lib_stem(&self) -> &str {
        "libnetcdf_c++4"
    }

    // The shipped configure script is unreliable; regenerate it from the
    // autotools sources on every build.
    fn force_autoreconf(&self) -> bool {
        true
    }

    fn handle_flags(
        &self,
        category: FlagCategory,
        mut flags: Vec<String>,
        spec: &ResolvedSpec<'_>,
        compiler: &dyn Compiler,
    ) -> Result<HandledFlags> {
        match category {
            FlagCategory::CFlags if spec.enabled("pic") => {
                flags.push(compiler.pic_flag().to_string());
            }
            FlagCategory::CppFlags => {
                let include = spec.dep_include(NETCDF_C)?;
                flags.push(format!("-I{}", include.display()));
            }
            _ => {}
        }
        Ok(HandledFlags::build_system(flags))
    }
}
