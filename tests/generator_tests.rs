//! Integration tests for incremental generation through `Generator::run`.
//!
//! Every test works in its own temporary directory. Source modification times
//! are pinned explicitly so that "touching" a file is deterministic.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use pyexport::{GenerationReport, Generator, GeneratorConfig, GeneratorError};
use tempdir::TempDir;

const DSP_SOURCE: &str = r#"#include <cmath>
#define EXPORT_TO_PYTHON

namespace dsp {
// EXPORT_TO_PYTHON float commented_out(float x);
EXPORT_TO_PYTHON
float gain(float x, float db) { return x * std::pow(10.0f, db / 20.0f); }

float helper(float x) { return x; }
}
"#;

const BUFFER_SOURCE: &str = r#"
EXPORT_TO_PYTHON
void fill(bbmp::OwnedChannelData<float>& data, float value);
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new("pyexport-generator").expect("Failed to create temp dir"),
        };
        fixture.write("generator.id", "v1", 1);
        fixture
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `content` to `name` and pins its modification time.
    fn write(&self, name: &str, content: &str, secs: u64) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write file");
        self.touch(name, secs);
        path
    }

    fn touch(&self, name: &str, secs: u64) {
        File::options()
            .write(true)
            .open(self.path(name))
            .and_then(|file| file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)))
            .expect("Failed to set modification time");
    }

    fn generator(&self) -> Generator {
        Generator::new(
            GeneratorConfig::new()
                .with_cache_path(self.path("bindings.cache"))
                .with_self_identity(self.path("generator.id")),
        )
    }

    fn run(&self, sources: &[&str]) -> GenerationReport {
        let sources: Vec<PathBuf> = sources.iter().map(|name| self.path(name)).collect();
        self.generator()
            .run(&sources, self.path("bindings.cpp"), "dsp_ext")
            .expect("Generation failed")
    }

    fn output(&self) -> String {
        fs::read_to_string(self.path("bindings.cpp")).expect("Failed to read output")
    }

    fn output_modified(&self) -> SystemTime {
        fs::metadata(self.path("bindings.cpp"))
            .and_then(|m| m.modified())
            .expect("Failed to stat output")
    }
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// =============================================================================
// First run
// =============================================================================

#[test]
fn test_first_run_generates_module() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.write("buffer.cpp", BUFFER_SOURCE, 100);

    let report = fixture.run(&["dsp.cpp", "buffer.cpp"]);

    assert!(report.output_written);
    assert_eq!(report.function_count, 2);
    assert_eq!(names(&report.reprocessed), ["dsp.cpp", "buffer.cpp"]);
    assert_eq!(names(&report.changed), ["dsp.cpp", "buffer.cpp"]);
    assert!(report.diagnostics.is_empty());

    let output = fixture.output();
    assert!(output.starts_with("/* THIS FILE IS AUTO GENERATED BY PYEXPORT */\n"));
    assert!(output.contains("#include \"bbmp_interop/types.hpp\""));
    assert!(output.contains("namespace dsp { extern float gain(float x, float db); }"));
    assert!(output.contains("extern void fill(bbmp::OwnedChannelData<float>& data, float value);"));
    assert!(output.contains("PYBIND11_MODULE(dsp_ext, m) {"));
    assert!(output.contains(
        "  m.def(\"dsp__gain\", &dsp::gain, pybind11::arg(\"x\"), pybind11::arg(\"db\"));"
    ));
    assert!(output.contains(
        "  m.def(\"fill\", &fill_wrapper, pybind11::arg(\"data\"), pybind11::arg(\"value\"));"
    ));
    assert!(!output.contains("commented_out"));
    assert!(!output.contains("helper"));

    // Registration order follows source order.
    assert!(output.find("dsp__gain").unwrap() < output.find("\"fill\"").unwrap());
    assert!(fixture.path("bindings.cache").exists());
}

#[test]
fn test_module_without_exports() {
    let fixture = Fixture::new();
    fixture.write("empty.cpp", "int main() { return 0; }\n", 100);

    let report = fixture.run(&["empty.cpp"]);

    assert!(report.output_written);
    assert_eq!(report.function_count, 0);
    assert!(fixture.output().contains("PYBIND11_MODULE(dsp_ext, m) {\n\n}"));
}

// =============================================================================
// Incremental behavior
// =============================================================================

#[test]
fn test_second_run_writes_nothing() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    let output_time = fixture.output_modified();
    let cache_bytes = fs::read(fixture.path("bindings.cache")).unwrap();

    let report = fixture.run(&["dsp.cpp"]);

    assert!(report.is_up_to_date());
    assert!(!report.cache_reset);
    assert_eq!(fixture.output_modified(), output_time);
    assert_eq!(fs::read(fixture.path("bindings.cache")).unwrap(), cache_bytes);
}

#[test]
fn test_touch_without_signature_change_skips_generation() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);
    let output_time = fixture.output_modified();

    // Body edit only: the exported signature stays the same.
    let edited = DSP_SOURCE.replace("return x;", "return x + 0.0f;");
    fixture.write("dsp.cpp", &edited, 200);

    let report = fixture.run(&["dsp.cpp"]);
    assert!(!report.output_written);
    assert_eq!(names(&report.reprocessed), ["dsp.cpp"]);
    assert!(report.changed.is_empty());
    assert_eq!(fixture.output_modified(), output_time);

    // The refreshed timestamp was persisted.
    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.is_up_to_date());
}

#[test]
fn test_changed_parameter_list_regenerates() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    let edited = DSP_SOURCE.replace("float gain(float x, float db)", "float gain(float x, float db, bool clip)");
    fixture.write("dsp.cpp", &edited, 200);

    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.output_written);
    assert_eq!(names(&report.changed), ["dsp.cpp"]);
    assert!(fixture.output().contains("pybind11::arg(\"db\"), pybind11::arg(\"clip\"));"));
}

#[test]
fn test_unchanged_sources_are_not_rescanned() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.write("buffer.cpp", BUFFER_SOURCE, 100);
    fixture.run(&["dsp.cpp", "buffer.cpp"]);

    let edited = BUFFER_SOURCE.replace("float value", "double value");
    fixture.write("buffer.cpp", &edited, 200);

    let report = fixture.run(&["dsp.cpp", "buffer.cpp"]);
    assert_eq!(names(&report.reprocessed), ["buffer.cpp"]);
    assert_eq!(report.function_count, 2);

    // Cached sections of the untouched file still make it into the output.
    let output = fixture.output();
    assert!(output.contains("dsp__gain"));
    assert!(output.contains("double value"));
}

#[test]
fn test_removed_source_is_evicted() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.write("buffer.cpp", BUFFER_SOURCE, 100);
    fixture.run(&["dsp.cpp", "buffer.cpp"]);

    let report = fixture.run(&["dsp.cpp"]);

    assert_eq!(names(&report.evicted), ["buffer.cpp"]);
    assert!(report.reprocessed.is_empty());
    assert!(report.output_written);
    assert_eq!(report.function_count, 1);
    assert!(!fixture.output().contains("fill"));
    assert!(!fixture.output().contains("bbmp_interop"));
}

#[test]
fn test_deleted_output_is_regenerated() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);
    let expected = fixture.output();

    fs::remove_file(fixture.path("bindings.cpp")).unwrap();

    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.output_written);
    assert!(report.reprocessed.is_empty());
    assert_eq!(fixture.output(), expected);
}

#[test]
fn test_generator_change_discards_cache() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    fixture.touch("generator.id", 2);

    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.cache_reset);
    assert!(report.output_written);
    assert_eq!(names(&report.reprocessed), ["dsp.cpp"]);
}

#[test]
fn test_corrupt_cache_rebuilds_everything() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    fs::write(fixture.path("bindings.cache"), b"not a cache").unwrap();

    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.output_written);
    assert_eq!(names(&report.reprocessed), ["dsp.cpp"]);

    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.is_up_to_date());
}

#[test]
fn test_clean_forces_full_rebuild() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    let generator = fixture.generator();
    generator.clean().unwrap();
    assert!(!fixture.path("bindings.cache").exists());
    // Cleaning twice is fine.
    generator.clean().unwrap();

    let report = fixture.run(&["dsp.cpp"]);
    assert!(report.output_written);
}

#[test]
fn test_changed_configuration_rebuilds_everything() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    let generator = Generator::new(
        GeneratorConfig::new()
            .with_cache_path(fixture.path("bindings.cache"))
            .with_self_identity(fixture.path("generator.id"))
            .with_indent(4),
    );
    let report = generator
        .run(&[fixture.path("dsp.cpp")], fixture.path("bindings.cpp"), "dsp_ext")
        .unwrap();

    assert!(report.output_written);
    assert_eq!(names(&report.reprocessed), ["dsp.cpp"]);
    assert!(fixture.output().contains("\n    m.def(\"dsp__gain\""));
}

// =============================================================================
// Errors and diagnostics
// =============================================================================

#[test]
fn test_unsupported_signature_is_reported_and_skipped() {
    let fixture = Fixture::new();
    let source = "EXPORT_TO_PYTHON int broken;\n\nEXPORT_TO_PYTHON\nint fine(int x) { return x; }\n";
    fixture.write("mixed.cpp", source, 100);

    let report = fixture.run(&["mixed.cpp"]);

    assert!(report.output_written);
    assert_eq!(report.function_count, 1);
    assert!(report.diagnostics.has_errors());

    let error = report.diagnostics.errors().next().unwrap();
    assert!(error.section.as_deref().unwrap().ends_with("mixed.cpp"));
    assert!(error.message.contains("int broken"));

    assert!(fixture.output().contains("m.def(\"fine\", &fine, pybind11::arg(\"x\"));"));
    assert!(!fixture.output().contains("broken"));
}

#[test]
fn test_unmatched_brace_is_a_warning() {
    let fixture = Fixture::new();
    let source = "namespace open {\nEXPORT_TO_PYTHON\nint f(int x);\n";
    fixture.write("open.cpp", source, 100);

    let report = fixture.run(&["open.cpp"]);

    assert!(!report.diagnostics.has_errors());
    assert_eq!(report.diagnostics.warnings().count(), 1);
    assert!(fixture.output().contains("m.def(\"open__f\", &open::f, pybind11::arg(\"x\"));"));
}

#[test]
fn test_missing_source_is_fatal() {
    let fixture = Fixture::new();

    let result = fixture.generator().run(
        &[fixture.path("missing.cpp")],
        fixture.path("bindings.cpp"),
        "dsp_ext",
    );

    let error = result.unwrap_err();
    assert!(error.path().unwrap().ends_with("missing.cpp"));
    assert!(!fixture.path("bindings.cpp").exists());
}

#[test]
fn test_equivalent_path_spellings_share_entries() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);
    fixture.run(&["dsp.cpp"]);

    // A path spelled with a redundant component still points to the same file.
    let spelled: PathBuf = fixture.dir.path().join(".").join("dsp.cpp");
    assert!(Path::new(&spelled).exists());
    let report = fixture
        .generator()
        .run(&[spelled], fixture.path("bindings.cpp"), "dsp_ext")
        .unwrap();
    assert!(report.is_up_to_date());
}

#[test]
fn test_empty_export_marker_is_rejected() {
    let fixture = Fixture::new();
    fixture.write("dsp.cpp", DSP_SOURCE, 100);

    let generator = Generator::new(
        GeneratorConfig::new()
            .with_cache_path(fixture.path("bindings.cache"))
            .with_self_identity(fixture.path("generator.id"))
            .with_export_marker(""),
    );
    let result = generator.run(&[fixture.path("dsp.cpp")], fixture.path("bindings.cpp"), "dsp_ext");

    assert!(matches!(result, Err(GeneratorError::EmptyExportMarker)));
    assert!(!fixture.path("bindings.cpp").exists());
}

#[test]
fn test_parameter_names_starting_with_const() {
    let fixture = Fixture::new();
    let source = "EXPORT_TO_PYTHON\nvoid scale(const float constant, int const_gain);\n";
    fixture.write("scale.cpp", source, 100);

    fixture.run(&["scale.cpp"]);

    let output = fixture.output();
    assert!(output.contains("extern void scale(const float constant, int const_gain);"));
    assert!(output.contains("pybind11::arg(\"constant\"), pybind11::arg(\"const_gain\"));"));
}
