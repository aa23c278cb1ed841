//! Compilation profiles.
//!
//! The default pipeline compiles C, C++ and Fortran sources with the
//! assembled [`CompilerSettings`]. On the accelerator platform with offload
//! threading enabled, three more pipelines exist, each with its own
//! compiler, object suffix and flag set. They are separate compilations,
//! not extra flags on the default one.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::core::options::{Choice, OptionSet};

use super::flags::CompilerSettings;
use super::toolchain::CommandSpec;

/// Build-tool placeholder for include flags.
pub const INCLUDE_FLAGS: &str = "$_CPPINCFLAGS";
/// Build-tool placeholder for the output object.
pub const TARGET: &str = "$TARGET";
/// Build-tool placeholder for the input sources.
pub const SOURCES: &str = "$SOURCES";

/// Source language of the default pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    C,
    Cxx,
    Fortran,
}

/// A compilation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompileProfile {
    /// Default pipeline for one language
    Standard(SourceLanguage),
    /// C code running on the accelerator host core
    AcceleratorHost,
    /// C code running on the accelerator slave cores
    AcceleratorSlave,
    /// C++ code running on the accelerator host core
    AcceleratorHostCxx,
}

impl CompileProfile {
    /// Stable profile name.
    pub fn name(&self) -> &'static str {
        match self {
            CompileProfile::Standard(SourceLanguage::C) => "c",
            CompileProfile::Standard(SourceLanguage::Cxx) => "cxx",
            CompileProfile::Standard(SourceLanguage::Fortran) => "fortran",
            CompileProfile::AcceleratorHost => "host",
            CompileProfile::AcceleratorSlave => "slave",
            CompileProfile::AcceleratorHostCxx => "cxx-host",
        }
    }

    /// Look up a profile by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.name() == name)
    }

    /// All profiles, standard ones first.
    pub fn all() -> [CompileProfile; 6] {
        [
            CompileProfile::Standard(SourceLanguage::C),
            CompileProfile::Standard(SourceLanguage::Cxx),
            CompileProfile::Standard(SourceLanguage::Fortran),
            CompileProfile::AcceleratorHost,
            CompileProfile::AcceleratorSlave,
            CompileProfile::AcceleratorHostCxx,
        ]
    }

    /// Whether this is one of the accelerator pipelines.
    pub fn is_accelerator(&self) -> bool {
        !matches!(self, CompileProfile::Standard(_))
    }

    /// Object file suffix produced by this pipeline.
    pub fn object_suffix(&self) -> &'static str {
        match self {
            CompileProfile::AcceleratorHost => "_host.o",
            CompileProfile::AcceleratorSlave => "_slave.o",
            CompileProfile::Standard(_) | CompileProfile::AcceleratorHostCxx => ".o",
        }
    }

    /// Object file name for a source file.
    pub fn object_for(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{}{}", stem, self.object_suffix()))
    }
}

impl fmt::Display for CompileProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CompileProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A profile together with its resolved compiler, flags and command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCommand {
    pub profile: CompileProfile,
    pub compiler: String,
    pub object_suffix: &'static str,
    /// Compiler flags, excluding include flags and in/out arguments
    pub flags: Vec<String>,
    pub command: CommandSpec,
}

impl ProfileCommand {
    fn new(profile: CompileProfile, compiler: &str, flags: Vec<String>, command: CommandSpec) -> Self {
        ProfileCommand {
            profile,
            compiler: compiler.to_string(),
            object_suffix: profile.object_suffix(),
            flags,
            command,
        }
    }
}

/// Profiles active for an option set.
///
/// The accelerator pipelines are only active on the accelerator platform
/// with offload threading enabled.
pub fn active_profiles(options: &OptionSet) -> Vec<CompileProfile> {
    CompileProfile::all()
        .into_iter()
        .filter(|p| !p.is_accelerator() || options.offload_enabled())
        .collect()
}

/// Resolve the command for one profile.
///
/// Returns `None` for accelerator profiles when the option set has no
/// accelerator options.
pub fn profile_command(
    profile: CompileProfile,
    options: &OptionSet,
    settings: &CompilerSettings,
) -> Option<ProfileCommand> {
    let label = format!("-DLABEL_INT{}", options.int_type.as_str());
    let scalar = format!("-DSCALAR_FLOAT{}", options.float_type.as_str());

    let (compiler, flags) = match profile {
        CompileProfile::Standard(lang) => {
            let (compiler, flags) = match lang {
                SourceLanguage::C => (&options.compilers.cc, &settings.ccflags),
                SourceLanguage::Cxx => (&options.compilers.cxx, &settings.ccflags),
                SourceLanguage::Fortran => (&options.compilers.f90, &settings.f90flags),
            };
            let command = CommandSpec::new(compiler)
                .args(["-o", TARGET, "-c"])
                .args(flags.iter().cloned())
                .args([INCLUDE_FLAGS, SOURCES]);
            return Some(ProfileCommand::new(profile, compiler, flags.clone(), command));
        }
        CompileProfile::AcceleratorHost => {
            let acc = options.accelerator.as_ref()?;
            let flags = vec!["-mhost".into(), "-mieee".into(), label, scalar, "-g".into(), "-O2".into()];
            (&acc.cc_host, flags)
        }
        CompileProfile::AcceleratorSlave => {
            let acc = options.accelerator.as_ref()?;
            let flags = vec![
                "-mslave".into(),
                "-mieee".into(),
                "-msimd".into(),
                label,
                scalar,
                "-g".into(),
                "-O2".into(),
            ];
            (&acc.cc_slave, flags)
        }
        CompileProfile::AcceleratorHostCxx => {
            let acc = options.accelerator.as_ref()?;
            let flags = vec!["-mhost".into(), "-mieee".into(), label, scalar, "-g".into(), "-O2".into()];
            (&acc.cxx_host, flags)
        }
    };

    let mut command = CommandSpec::new(compiler)
        .args(flags.iter().cloned())
        .arg(INCLUDE_FLAGS);
    let mut all_flags = flags;
    if profile == CompileProfile::AcceleratorSlave {
        let slave_only = ["-fgnu89-inline", "-D_SW_COMPILER_VERSION"];
        command = command.args(slave_only);
        all_flags.extend(slave_only.iter().map(|f| f.to_string()));
    }
    let command = command.args(["-c", "-o", TARGET, SOURCES]);

    Some(ProfileCommand::new(profile, compiler, all_flags, command))
}

/// Resolve commands for every active profile.
pub fn resolve_profiles(options: &OptionSet, settings: &CompilerSettings) -> Vec<ProfileCommand> {
    active_profiles(options)
        .into_iter()
        .filter_map(|p| profile_command(p, options, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::flags::resolve_compiler_settings;
    use crate::builder::toolchain::{AliasTable, FlagTable};
    use crate::core::paths::DerivedPaths;
    use crate::test_support::{linux_options, project_root, sw_options};

    fn settings_for(options: &OptionSet) -> CompilerSettings {
        let paths = DerivedPaths::new(&project_root(), options);
        resolve_compiler_settings(options, &paths, &AliasTable::builtin(), &FlagTable::builtin())
            .unwrap()
    }

    fn command(profile: CompileProfile, options: &OptionSet) -> ProfileCommand {
        profile_command(profile, options, &settings_for(options)).unwrap()
    }

    #[test]
    fn test_linux_has_only_standard_profiles() {
        let profiles = active_profiles(&linux_options());
        assert_eq!(profiles.len(), 3);
        assert!(profiles.iter().all(|p| !p.is_accelerator()));
    }

    #[test]
    fn test_accelerator_without_offload_has_only_standard_profiles() {
        assert_eq!(active_profiles(&sw_options(false)).len(), 3);
    }

    #[test]
    fn test_offload_adds_three_profiles() {
        let opts = sw_options(true);
        let accel: Vec<_> = active_profiles(&opts)
            .into_iter()
            .filter(CompileProfile::is_accelerator)
            .collect();

        assert_eq!(
            accel,
            vec![
                CompileProfile::AcceleratorHost,
                CompileProfile::AcceleratorSlave,
                CompileProfile::AcceleratorHostCxx,
            ]
        );
        let suffixes: Vec<_> = accel.iter().map(|p| p.object_suffix()).collect();
        assert_eq!(suffixes, vec!["_host.o", "_slave.o", ".o"]);
    }

    #[test]
    fn test_host_command() {
        let cmd = command(CompileProfile::AcceleratorHost, &sw_options(true));
        assert_eq!(
            cmd.command.to_command_line(),
            "sw5gcc -mhost -mieee -DLABEL_INT32 -DSCALAR_FLOAT64 -g -O2 $_CPPINCFLAGS -c -o $TARGET $SOURCES"
        );
        assert_eq!(cmd.object_suffix, "_host.o");
    }

    #[test]
    fn test_slave_command() {
        let cmd = command(CompileProfile::AcceleratorSlave, &sw_options(true));
        assert_eq!(
            cmd.command.to_command_line(),
            "sw5gcc -mslave -mieee -msimd -DLABEL_INT32 -DSCALAR_FLOAT64 -g -O2 $_CPPINCFLAGS \
             -fgnu89-inline -D_SW_COMPILER_VERSION -c -o $TARGET $SOURCES"
        );
        assert_eq!(cmd.object_suffix, "_slave.o");
    }

    #[test]
    fn test_host_cxx_uses_cxx_host_compiler() {
        let mut opts = sw_options(true);
        if let Some(acc) = opts.accelerator.as_mut() {
            acc.cxx_host = "mpiCC".to_string();
        }
        let cmd = command(CompileProfile::AcceleratorHostCxx, &opts);
        assert_eq!(cmd.compiler, "mpiCC");
        assert_eq!(cmd.object_suffix, ".o");
    }

    #[test]
    fn test_accelerator_profiles_do_not_use_shared_flag_groups() {
        let opts = sw_options(true);
        let settings = settings_for(&opts);
        let shared = FlagTable::builtin()
            .flags_for(settings.compiler.identity, opts.build_type)
            .unwrap();

        for profile in [CompileProfile::AcceleratorHost, CompileProfile::AcceleratorSlave] {
            let cmd = profile_command(profile, &opts, &settings).unwrap();
            for flag in shared.split_whitespace() {
                assert!(!cmd.flags.iter().any(|f| f == flag), "{profile} has {flag}");
            }
            assert!(!cmd.flags.contains(&"-DWM_DP".to_string()));
        }

        let host = command(CompileProfile::AcceleratorHost, &opts);
        let slave = command(CompileProfile::AcceleratorSlave, &opts);
        assert_ne!(host.flags, slave.flags);
        assert!(slave.flags.contains(&"-msimd".to_string()));
        assert!(!host.flags.contains(&"-msimd".to_string()));
    }

    #[test]
    fn test_standard_command_uses_settings() {
        let opts = linux_options();
        let settings = settings_for(&opts);
        let cmd = profile_command(CompileProfile::Standard(SourceLanguage::Fortran), &opts, &settings)
            .unwrap();

        assert_eq!(cmd.compiler, "gfortran");
        assert_eq!(cmd.flags, settings.f90flags);
        assert_eq!(cmd.command.args[..3], ["-o", "$TARGET", "-c"]);
        assert_eq!(cmd.command.args.last().unwrap(), "$SOURCES");
    }

    #[test]
    fn test_accelerator_profile_needs_accelerator_options() {
        let opts = linux_options();
        assert!(profile_command(CompileProfile::AcceleratorSlave, &opts, &settings_for(&opts)).is_none());
    }

    #[test]
    fn test_object_names() {
        let src = Path::new("src/kernel/flux.c");
        assert_eq!(
            CompileProfile::AcceleratorSlave.object_for(src),
            PathBuf::from("src/kernel/flux_slave.o")
        );
        assert_eq!(
            CompileProfile::AcceleratorHost.object_for(src),
            PathBuf::from("src/kernel/flux_host.o")
        );
        assert_eq!(
            CompileProfile::Standard(SourceLanguage::C).object_for(src),
            PathBuf::from("src/kernel/flux.o")
        );
    }

    #[test]
    fn test_profile_names_round_trip() {
        for p in CompileProfile::all() {
            assert_eq!(CompileProfile::from_name(p.name()), Some(p));
        }
        assert_eq!(CompileProfile::from_name("gpu"), None);
    }
}
