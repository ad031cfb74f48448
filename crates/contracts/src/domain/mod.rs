pub mod a025_wc_connection;
