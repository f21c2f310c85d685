mod helpers;
mod test_cli;
mod test_package;
mod test_propagate;
