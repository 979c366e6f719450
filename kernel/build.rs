fn main() {
    println!("cargo:rerun-if-changed=src/boot.S");
    println!("cargo:rerun-if-changed=src/trap/vector.S");
    println!("cargo:rerun-if-changed=src/linker.ld");

    // 宿主机上 (cargo check / clippy) 没有汇编可编
    let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let (march, mabi) = match arch.as_str() {
        "riscv64" => ("rv64gc", "lp64d"),
        "riscv32" => ("rv32imac_zicsr", "ilp32"),
        _ => return,
    };

    cc::Build::new()
        .file("src/boot.S")
        .file("src/trap/vector.S")
        .flag(&format!("-march={}", march))
        .flag(&format!("-mabi={}", mabi))
        .compile("boot");
}
