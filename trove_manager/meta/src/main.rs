fn main() {
    multiversx_sc_meta_lib::cli_main::<trove_manager::AbiProvider>();
}
