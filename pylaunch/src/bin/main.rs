use std::env;

// exits 1 on any failure, the image is replaced otherwise
fn main() -> anyhow::Result<()> {
    match pylaunch::launch(env::args_os().collect())? {}
}
