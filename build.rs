fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fall back to the bundled protoc when the host has none.
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    println!("cargo:rerun-if-changed=proto/data_transfer.proto");
    tonic_build::compile_protos("proto/data_transfer.proto")?;
    Ok(())
}
