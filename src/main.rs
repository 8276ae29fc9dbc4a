fn main() {
    if let Err(err) = trace_stack_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
