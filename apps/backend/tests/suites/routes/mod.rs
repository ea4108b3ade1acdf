pub mod round_flow;
