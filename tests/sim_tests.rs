//! Tests for the simulation harness: image parsing, load validation, and
//! configuration defaults.

use cryptcore::config::Config;
use cryptcore::core::Memory;
use cryptcore::crypto;
use cryptcore::sim::loader::{self, LoadError};
use cryptcore::sim::programs;

/// Tests hex-word parsing with comments, blank lines, and 0x prefixes.
#[test]
fn test_parse_image_accepts_comments_and_prefixes() {
    let text = "\
# program header
0x1234

ABCD  # trailing comment
003f
";
    let words = loader::parse_image(text).unwrap();
    assert_eq!(words, vec![0x1234, 0xABCD, 0x003F]);
}

/// Tests that a malformed word reports its line number.
#[test]
fn test_parse_image_rejects_bad_word() {
    let text = "1234\nnot-hex\n";
    match loader::parse_image(text) {
        Err(LoadError::BadWord { line, text }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "not-hex");
        }
        other => panic!("Expected BadWord, got {other:?}"),
    }
}

/// Tests that a word wider than 16 bits is rejected.
#[test]
fn test_parse_image_rejects_wide_word() {
    assert!(matches!(
        loader::parse_image("12345"),
        Err(LoadError::BadWord { line: 1, .. })
    ));
}

/// Tests program-size validation against instruction memory.
#[test]
fn test_load_program_size_limit() {
    let mut mem = Memory::new();

    let fits = vec![0u16; 256];
    assert!(loader::load_program(&mut mem, &fits).is_ok());

    let too_big = vec![0u16; 257];
    assert!(matches!(
        loader::load_program(&mut mem, &too_big),
        Err(LoadError::ProgramTooLarge { len: 257 })
    ));
}

/// Tests data-size validation against data memory.
#[test]
fn test_load_data_size_limit() {
    let mut mem = Memory::new();

    let too_big = vec![0u16; 1025];
    assert!(matches!(
        loader::load_data(&mut mem, &too_big),
        Err(LoadError::DataTooLarge { len: 1025 })
    ));
}

/// Tests that the built-in demo image carries the documented key and
/// plaintext and produces the expected ciphertext when run.
#[test]
fn test_demo_program_image() {
    let mut mem = Memory::new();
    programs::single_block_program(&mut mem);

    assert_eq!(mem.read_data(0).unwrap(), programs::DEMO_KEY);
    assert_eq!(mem.read_data(1).unwrap(), programs::DEMO_PLAINTEXT);

    let mut cpu = cryptcore::core::SingleCycleCpu::new(mem);
    let outcome =
        cryptcore::sim::run_single_cycle(&mut cpu, Config::default().general.max_cycles);

    assert!(outcome.halted());
    assert_eq!(
        cpu.read_memory_word(2).unwrap(),
        crypto::encrypt(programs::DEMO_PLAINTEXT, programs::DEMO_KEY, 0)
    );
    assert_eq!(cpu.read_memory_word(3).unwrap(), programs::DEMO_PLAINTEXT);
}

/// Tests configuration defaults and TOML overrides.
#[test]
fn test_config_defaults_and_parse() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, 10_000);

    let parsed: Config = toml::from_str(
        "[general]\ntrace_instructions = true\nmax_cycles = 99\n",
    )
    .unwrap();
    assert!(parsed.general.trace_instructions);
    assert_eq!(parsed.general.max_cycles, 99);

    let partial: Config = toml::from_str("[general]\nmax_cycles = 7\n").unwrap();
    assert!(!partial.general.trace_instructions);
    assert_eq!(partial.general.max_cycles, 7);
}
