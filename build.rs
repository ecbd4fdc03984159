use std::env;
use std::fs;
use std::path::Path;

/// Prefijo de las variables que se reenvían al compilador
const FORWARDED_PREFIX: &str = "SCANNER_";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let env_file = Path::new(".env");
    if !env_file.exists() {
        // Sin .env se usan los valores por defecto de config.rs
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=No se pudo leer .env, usando valores por defecto");
        return;
    };

    for (key, value) in contents.lines().filter_map(parse_line) {
        if !key.starts_with(FORWARDED_PREFIX) {
            continue;
        }
        // El entorno real tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}

/// Parsear una línea KEY=VALUE (ignora comentarios y líneas vacías)
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim().trim_matches('"')))
}
