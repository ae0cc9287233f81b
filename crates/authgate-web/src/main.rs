fn main() {
    authgate_web::main();
}
