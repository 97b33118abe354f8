use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features that select a kernel backend
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // Every token must be reported by the CPU for the backend to be usable
    required: &'static [&'static str],
    target_arch: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Priority order between backends (Lowest number == Highest Priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "neon" => 1,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                required: &["avx2", "fma"],
                target_arch: "x86_64",
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                // Linux reports Advanced SIMD as `asimd`, macOS as `neon`
                required: &["neon"],
                target_arch: "aarch64",
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") else {
            return;
        };

        // Flags are whitespace separated on the `flags` (x86) or `Features` (arm) lines
        let flags: Vec<String> = cpuinfo
            .lines()
            .filter(|line| {
                let key = line.split(':').next().unwrap_or("").trim().to_lowercase();
                key == "flags" || key == "features"
            })
            .flat_map(|line| line.split(':').nth(1).unwrap_or("").split_whitespace())
            .map(|flag| flag.to_lowercase())
            .collect();

        let has = |token: &str| {
            flags.iter().any(|flag| {
                flag == token || (token == "neon" && flag == "asimd")
            })
        };

        for feature in features.iter_mut() {
            feature.detected = feature.required.iter().all(|token| has(*token));
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    "avx2" => {
                        contents.contains("hw.optional.avx2_0: 1")
                            && contents.contains("hw.optional.fma: 1")
                    }
                    "neon" => {
                        contents.contains("hw.optional.neon: 1")
                            || contents.contains("hw.optional.arm.advsimd: 1")
                    }
                    _ => false,
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature], target_arch: &str) {
        features.sort();

        // Highest priority detected backend for this architecture, portable otherwise
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected && cpu_feature.target_arch == target_arch)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("applying: {cfg_flag}");
        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LANEKIT_FORCE_PORTABLE");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let force_portable = env::var("LANEKIT_FORCE_PORTABLE").is_ok_and(|value| value == "1");

    // Only run CPU detection for native builds
    if host == target && !force_portable {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features, &target_arch);
}
