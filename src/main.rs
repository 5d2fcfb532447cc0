// This binary crate is intentionally minimal.
// All network and matrix logic lives in the library (src/lib.rs and its modules).
// Run the demos with:
//   cargo run --example logic_gates
//   cargo run --example xor
fn main() {
    println!("toynet: a one-hidden-layer neural network trained by backpropagation.");
    println!("Run `cargo run --example logic_gates` or `cargo run --example xor`.");
}
