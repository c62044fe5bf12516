// This binary crate is intentionally minimal.
// All training-harness logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example classify
fn main() {
    println!("ferrite-train: a supervised-classification training harness in Rust.");
    println!("Run `cargo run --example classify` to train on the synthetic demo dataset.");
    println!("Then `cargo run --bin viewer -- report/` to browse the run report.");
}
