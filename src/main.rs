fn main() {
    branchaudit::app::startup::startup();
}
