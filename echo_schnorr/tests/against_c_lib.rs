use echo_schnorr::{
    Schnorr, Signature,
    fun::{Scalar, XOnly},
};
use proptest::prelude::*;
use secp256k1::{Keypair, Message, Secp256k1, XOnlyPublicKey, schnorr};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_signatures_as_libsecp(
        key in any::<Scalar>(),
        message in any::<[u8; 32]>(),
        aux_rand in any::<[u8; 32]>(),
    ) {
        let secp = Secp256k1::new();
        let libsecp_keypair = Keypair::from_seckey_slice(&secp, &key.to_bytes()).unwrap();
        let (libsecp_pk, _) = libsecp_keypair.x_only_public_key();
        let libsecp_message = Message::from_digest(message);
        let libsecp_sig = secp.sign_schnorr_with_aux_rand(&libsecp_message, &libsecp_keypair, &aux_rand);

        let keypair = Schnorr.new_keypair(key);
        prop_assert_eq!(keypair.public_key().into_bytes(), libsecp_pk.serialize());
        let signature = Schnorr.sign(&keypair, &message, Some(&aux_rand[..])).unwrap();
        let parsed = schnorr::Signature::from_slice(&signature.to_bytes()).unwrap();
        prop_assert_eq!(parsed, libsecp_sig);
        prop_assert!(secp.verify_schnorr(&parsed, &libsecp_message, &libsecp_pk).is_ok());
    }

    #[test]
    fn libsecp_accepts_our_tampered_signatures_only_when_we_do(
        key in any::<Scalar>(),
        message in any::<[u8; 32]>(),
        flip in 0usize..64,
    ) {
        let secp = Secp256k1::new();
        let keypair = Schnorr.new_keypair(key);
        let mut signature = Schnorr.sign(&keypair, &message, None).unwrap().to_bytes();
        signature[flip] ^= 0x01;

        let ours = Schnorr.verify(keypair.public_key().as_bytes(), &message, &signature);
        let libsecp_pk = XOnlyPublicKey::from_slice(keypair.public_key().as_bytes()).unwrap();
        let theirs = match schnorr::Signature::from_slice(&signature) {
            Ok(signature) => secp
                .verify_schnorr(&signature, &Message::from_digest(message), &libsecp_pk)
                .is_ok(),
            Err(_) => false,
        };
        prop_assert_eq!(ours, theirs);
        prop_assert!(!ours);
    }
}

#[test]
fn x_coordinates_off_the_curve() {
    let mut rejected = 0;
    for i in 1..=32u8 {
        let mut bytes = [0u8; 32];
        bytes[31] = i;
        let libsecp_ok = XOnlyPublicKey::from_slice(&bytes).is_ok();
        assert_eq!(XOnly::from_bytes(bytes).is_some(), libsecp_ok, "x = {}", i);
        if !libsecp_ok {
            rejected += 1;
            let signature = Signature::random(&mut rand::thread_rng());
            assert!(!Schnorr.verify(&bytes, b"m", &signature.to_bytes()));
        }
    }
    assert!(rejected > 0);
}
