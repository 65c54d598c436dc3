use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";

/// Length of the api tokens handed out to `User`s
pub const API_TOKEN_LEN: usize = 40;

/// Random alphanumeric string of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..secret_len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn create_api_token() -> String {
    create_random_secret(API_TOKEN_LEN)
}
